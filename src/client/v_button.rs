use std::any::Any;

use serde_json::{json, Value};

use crate::client::client_error::ClientError;
use crate::client::dom::{ElementId, STYLE_HEIGHT, STYLE_WIDTH};
use crate::client::paintable::{set_inline_size, Paintable};
use crate::client::session::{malformed, ClientSession};
use crate::server::button::{ATTR_CAPTION, ATTR_DISABLED, VAR_STATE};
use crate::uidl::pid::Pid;
use crate::uidl::uidl::Uidl;
use crate::uidl::variable_change::{MouseDetails, VariableChange};

pub const CLASSNAME: &str = "v-button";
pub const DISABLED_CLASSNAME: &str = "v-disabled";

pub struct VButton {
    pid: Pid,
    element: ElementId,
    enabled: bool,
}

impl VButton {
    pub fn new(pid: &Pid, session: &mut ClientSession) -> Self {
        let element = session.dom_mut().create_element("div");
        session.dom_mut().set_class_names(element, CLASSNAME);
        VButton {
            pid: pid.clone(),
            element,
            enabled: true,
        }
    }

    pub fn factory(pid: &Pid, session: &mut ClientSession) -> Box<dyn Paintable> {
        Box::new(Self::new(pid, session))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Paintable for VButton {
    fn pid(&self) -> &Pid {
        &self.pid
    }

    fn typename(&self) -> &'static str {
        "VButton"
    }

    fn element(&self) -> ElementId {
        self.element
    }

    fn style_primary_name(&self) -> &str {
        CLASSNAME
    }

    fn update_from_uidl(&mut self, uidl: &Uidl, session: &mut ClientSession) -> Result<(), ClientError> {
        if session.update_component(self, uidl)? {
            return Ok(());
        }

        let caption = match uidl.attribute(ATTR_CAPTION) {
            None => "",
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return Err(malformed(&self.pid, ATTR_CAPTION, other)),
        };
        session.dom_mut().set_text(self.element, caption);

        self.enabled = !uidl.bool_attribute(ATTR_DISABLED);
        if !self.enabled {
            session.dom_mut().add_class_name(self.element, DISABLED_CLASSNAME);
        }
        Ok(())
    }

    fn set_width(&mut self, width: Option<i32>, session: &mut ClientSession) {
        set_inline_size(session, self.element, STYLE_WIDTH, width);
    }

    fn set_height(&mut self, height: Option<i32>, session: &mut ClientSession) {
        set_inline_size(session, self.element, STYLE_HEIGHT, height);
    }

    fn handle_click(&self, _target: ElementId, _details: &MouseDetails, _session: &ClientSession) -> Option<VariableChange> {
        if !self.enabled {
            return None;
        }
        Some(VariableChange::new(self.pid.clone(), VAR_STATE, json!(true), true))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
