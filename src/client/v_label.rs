use std::any::Any;

use serde_json::Value;

use crate::client::client_error::ClientError;
use crate::client::dom::{ElementId, STYLE_HEIGHT, STYLE_WIDTH};
use crate::client::paintable::{set_inline_size, Paintable};
use crate::client::session::{malformed, ClientSession};
use crate::server::label::ATTR_TEXT;
use crate::uidl::pid::Pid;
use crate::uidl::uidl::Uidl;

pub const CLASSNAME: &str = "v-label";

pub struct VLabel {
    pid: Pid,
    element: ElementId,
}

impl VLabel {
    pub fn new(pid: &Pid, session: &mut ClientSession) -> Self {
        let element = session.dom_mut().create_element("div");
        session.dom_mut().set_class_names(element, CLASSNAME);
        VLabel { pid: pid.clone(), element }
    }

    pub fn factory(pid: &Pid, session: &mut ClientSession) -> Box<dyn Paintable> {
        Box::new(Self::new(pid, session))
    }
}

impl Paintable for VLabel {
    fn pid(&self) -> &Pid {
        &self.pid
    }

    fn typename(&self) -> &'static str {
        "VLabel"
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

        let text = match uidl.attribute(ATTR_TEXT) {
            None => "",
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return Err(malformed(&self.pid, ATTR_TEXT, other)),
        };
        session.dom_mut().set_text(self.element, text);
        Ok(())
    }

    fn set_width(&mut self, width: Option<i32>, session: &mut ClientSession) {
        set_inline_size(session, self.element, STYLE_WIDTH, width);
    }

    fn set_height(&mut self, height: Option<i32>, session: &mut ClientSession) {
        set_inline_size(session, self.element, STYLE_HEIGHT, height);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
