use thiserror::Error;

use crate::primitives::dimension::DimensionError;
use crate::uidl::paint_error::PaintError;
use crate::widget::widget::WID;

pub const MARGIN_UNSUPPORTED: &str =
    "Setting the margins from the server side is not supported. Use CSS instead";

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("component {0} is already a child of this layout")]
    DuplicateChild(WID),
    #[error("adding component {0} would make the layout contain itself")]
    WouldCreateCycle(WID),
    #[error("component {child} is attached to container {parent}, remove it there first")]
    AlreadyAttached { child: WID, parent: WID },
    #[error("index {index} out of bounds, layout has {len} children")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("{0}")]
    Unsupported(&'static str),
    #[error("invalid size: {0}")]
    InvalidDimension(#[from] DimensionError),
    #[error("paint failed: {0}")]
    Paint(#[from] PaintError),
}
