use log::debug;

use crate::server::component::{Component, ComponentState};
use crate::uidl::paint_error::PaintError;
use crate::uidl::paint_target::PaintTarget;
use crate::uidl::variable_change::VariableChange;
use crate::widget::widget::{get_new_widget_id, WID};

pub const ATTR_CAPTION: &str = "caption";
pub const ATTR_DISABLED: &str = "disabled";
pub const VAR_STATE: &str = "state";

pub struct Button {
    id: WID,
    state: ComponentState,
    caption: String,
    enabled: bool,
    clicks: usize,
}

impl Button {
    pub const TAG: &'static str = "button";

    pub fn new(caption: impl Into<String>) -> Self {
        Button {
            id: get_new_widget_id(),
            state: ComponentState::default(),
            caption: caption.into(),
            enabled: true,
            clicks: 0,
        }
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.state.request_repaint();
        }
    }

    pub fn clicks(&self) -> usize {
        self.clicks
    }
}

impl Component for Button {
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
        target.add_attribute(ATTR_CAPTION, self.caption.as_str())?;
        if !self.enabled {
            target.add_attribute(ATTR_DISABLED, true)?;
        }
        Ok(())
    }

    fn change_variables(&mut self, changes: &[VariableChange]) {
        for change in changes {
            if change.name == VAR_STATE && change.value.as_bool() == Some(true) {
                if self.enabled {
                    self.clicks += 1;
                } else {
                    debug!("button {} clicked while disabled, ignoring", self.id);
                }
            }
        }
    }
}
