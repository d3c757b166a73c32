use std::any::Any;

use crate::client::client_error::ClientError;
use crate::client::dom::ElementId;
use crate::client::session::ClientSession;
use crate::primitives::render_space::RenderSpace;
use crate::uidl::pid::Pid;
use crate::uidl::uidl::Uidl;
use crate::uidl::variable_change::{MouseDetails, VariableChange};

/*
Client side counterpart of a server component. Paintables are owned by the session's identity
index and receive the session on every call, so they can reach the document and other
paintables without holding references to either.
 */
pub trait Paintable: Any {
    fn pid(&self) -> &Pid;

    fn typename(&self) -> &'static str;

    fn element(&self) -> ElementId;

    fn style_primary_name(&self) -> &str;

    fn update_from_uidl(&mut self, uidl: &Uidl, session: &mut ClientSession) -> Result<(), ClientError>;

    /// Outer size in pixels as decided by the parent, None means "size yourself".
    fn set_width(&mut self, width: Option<i32>, session: &mut ClientSession);

    fn set_height(&mut self, height: Option<i32>, session: &mut ClientSession);

    fn set_style_name(&mut self, style: &str, session: &mut ClientSession) {
        session.dom_mut().set_class_names(self.element(), style);
    }

    /*
    Called for a click on `target`, which is this paintable's element or something inside it.
    Returns the variable change to send, None if this paintable does not care.
     */
    fn handle_click(&self, _target: ElementId, _details: &MouseDetails, _session: &ClientSession) -> Option<VariableChange> {
        None
    }

    fn as_container(&self) -> Option<&dyn Container> {
        None
    }

    fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Paintable {
    pub fn as_paintable<T: Paintable>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// A paintable that has children paintables.
pub trait Container {
    fn allocated_space(&self, child: &Pid, session: &ClientSession) -> RenderSpace;

    fn has_child_component(&self, child: &Pid, session: &ClientSession) -> bool;

    /// Puts `new` in the slot of `old`. Nothing happens if `old` is not a child.
    fn replace_child_component(&mut self, old: &Pid, new: &Pid, session: &mut ClientSession);

    fn remove_child_component(&mut self, child: &Pid, session: &mut ClientSession) -> bool;

    /*
    Children changed their size. Returns true if the container size is fixed, so nothing above it
    has to be laid out again.
     */
    fn request_layout(&mut self, children: &[Pid], session: &mut ClientSession) -> bool;

    fn update_caption(&mut self, child: &Pid, uidl: &Uidl);
}

/// Sets one axis of the size through an inline style, the way leaf widgets are sized.
pub fn set_inline_size(session: &mut ClientSession, element: ElementId, property: &str, size: Option<i32>) {
    match size {
        Some(px) => session.dom_mut().set_style_property(element, property, &format!("{}px", px)),
        None => session.dom_mut().clear_style_property(element, property),
    }
}
