use std::any::Any;

use serde_json::Value;

use crate::client::client_error::ClientError;
use crate::client::dom::ElementId;
use crate::client::paintable::Paintable;
use crate::client::session::ClientSession;
use crate::uidl::pid::Pid;
use crate::uidl::uidl::Uidl;

pub const FAILING_TAG: &str = "failing";

/// Paintable that gets mounted like any other, but whose every update fails.
pub struct FailingPaintable {
    pid: Pid,
    element: ElementId,
    pub attempts: usize,
}

impl FailingPaintable {
    pub fn factory(pid: &Pid, session: &mut ClientSession) -> Box<dyn Paintable> {
        let element = session.dom_mut().create_element("div");
        Box::new(FailingPaintable {
            pid: pid.clone(),
            element,
            attempts: 0,
        })
    }
}

impl Paintable for FailingPaintable {
    fn pid(&self) -> &Pid {
        &self.pid
    }

    fn typename(&self) -> &'static str {
        "FailingPaintable"
    }

    fn element(&self) -> ElementId {
        self.element
    }

    fn style_primary_name(&self) -> &str {
        "mock-failing"
    }

    fn update_from_uidl(&mut self, uidl: &Uidl, _session: &mut ClientSession) -> Result<(), ClientError> {
        self.attempts += 1;
        Err(ClientError::MalformedAttribute {
            pid: self.pid.clone(),
            name: "anything".to_string(),
            value: uidl.attribute("anything").cloned().unwrap_or(Value::Null).to_string(),
        })
    }

    fn set_width(&mut self, _width: Option<i32>, _session: &mut ClientSession) {}

    fn set_height(&mut self, _height: Option<i32>, _session: &mut ClientSession) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
