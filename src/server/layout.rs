use serde::{Deserialize, Serialize};

use crate::server::component::Component;
use crate::server::layout_error::LayoutError;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MarginInfo {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl MarginInfo {
    pub fn all(enabled: bool) -> Self {
        MarginInfo {
            top: enabled,
            right: enabled,
            bottom: enabled,
            left: enabled,
        }
    }
}

/*
Margin toggles every layout is expected to offer. Layouts that leave margins to CSS answer
all of these with LayoutError::Unsupported.
 */
pub trait Layout: Component {
    fn set_margin(&mut self, enabled: bool) -> Result<(), LayoutError>;

    fn set_margin_info(&mut self, margins: MarginInfo) -> Result<(), LayoutError>;

    fn set_margins(&mut self, top: bool, right: bool, bottom: bool, left: bool) -> Result<(), LayoutError>;

    fn margin(&self) -> Result<MarginInfo, LayoutError>;
}
