use crate::uidl::variable_change::MouseDetails;
use crate::widget::widget::WID;

/*
"The layout was clicked". `child` is the direct child the click landed in, None when the click
hit the layout itself (e.g. the space between children).
 */
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutClickEvent {
    pub source: WID,
    pub child: Option<WID>,
    pub details: MouseDetails,
}

impl LayoutClickEvent {
    pub fn is_double_click(&self) -> bool {
        self.details.double_click
    }
}
