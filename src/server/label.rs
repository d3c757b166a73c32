use crate::server::component::{Component, ComponentState};
use crate::uidl::paint_error::PaintError;
use crate::uidl::paint_target::PaintTarget;
use crate::widget::widget::{get_new_widget_id, WID};

pub const ATTR_TEXT: &str = "text";

pub struct Label {
    id: WID,
    state: ComponentState,
    text: String,
}

impl Label {
    pub const TAG: &'static str = "label";

    pub fn new(text: impl Into<String>) -> Self {
        Label {
            id: get_new_widget_id(),
            state: ComponentState::default(),
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.state.request_repaint();
    }
}

impl Component for Label {
    fn id(&self) -> WID {
        self.id
    }

    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn state(&self) -> &ComponentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        &mut self.state
    }

    fn paint_content(&self, target: &mut PaintTarget) -> Result<(), PaintError> {
        target.add_attribute(ATTR_TEXT, self.text.as_str())
    }
}
