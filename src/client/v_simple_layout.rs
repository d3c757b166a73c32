use std::any::Any;

use log::{debug, warn};

use crate::client::client_error::ClientError;
use crate::client::dom::{Dom, ElementId, STYLE_HEIGHT, STYLE_WIDTH};
use crate::client::paintable::{Container, Paintable};
use crate::client::render_state::RenderState;
use crate::client::session::ClientSession;
use crate::client::sizing::SizingEngine;
use crate::primitives::render_space::RenderSpace;
use crate::server::simple_layout::ATTR_STRIP;
use crate::uidl::pid::Pid;
use crate::uidl::uidl::{Uidl, ATTR_EVENT_LISTENERS};
use crate::uidl::variable_change::{LayoutClickPayload, MouseDetails, VariableChange, LAYOUT_CLICK_EVENT};

pub const CLASSNAME: &str = "v-simplelayout";

/// What one reconciliation pass did to the children of the container element.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReconcileStats {
    pub mounted: usize,
    pub moved: usize,
    pub removed: usize,
}

impl ReconcileStats {
    pub fn is_noop(&self) -> bool {
        *self == ReconcileStats::default()
    }
}

/*
Client side of SimpleLayout. Every pass walks the child descriptors in order and makes the
container element's children match them by position: a child already in place is left alone,
anything else is inserted (or moved) to its position, and whatever is left after the last
descriptor is removed and unregistered.
 */
pub struct VSimpleLayout {
    pid: Pid,
    element: ElementId,
    render_state: RenderState,
    sizing: SizingEngine,
    strip_dimensions: bool,
    click_enabled: bool,
    last_style_name: Option<String>,
    last_stats: ReconcileStats,
}

impl VSimpleLayout {
    pub fn new(pid: &Pid, session: &mut ClientSession) -> Self {
        let element = session.dom_mut().create_element("div");
        session.dom_mut().set_class_names(element, CLASSNAME);
        session.ensure_rule(&format!(".{}", CLASSNAME), &[("float", "left")]);

        VSimpleLayout {
            pid: pid.clone(),
            element,
            render_state: RenderState::Idle,
            sizing: SizingEngine::new(),
            strip_dimensions: false,
            click_enabled: false,
            last_style_name: None,
            last_stats: ReconcileStats::default(),
        }
    }

    pub fn factory(pid: &Pid, session: &mut ClientSession) -> Box<dyn Paintable> {
        Box::new(Self::new(pid, session))
    }

    pub fn render_state(&self) -> RenderState {
        self.render_state
    }

    pub fn sizing(&self) -> &SizingEngine {
        &self.sizing
    }

    pub fn strip_dimensions(&self) -> bool {
        self.strip_dimensions
    }

    pub fn click_enabled(&self) -> bool {
        self.click_enabled
    }

    pub fn last_stats(&self) -> ReconcileStats {
        self.last_stats
    }

    /// Class of the style rule holding this container's size.
    pub fn scoped_class_name(&self) -> String {
        format!("{}-{}", CLASSNAME, self.pid)
    }

    /// Mounted children in document order.
    pub fn mounted_children(&self, session: &ClientSession) -> Vec<Pid> {
        session
            .dom()
            .children(self.element)
            .into_iter()
            .filter_map(|el| session.pid_for_element(el).cloned())
            .collect()
    }

    fn render(&mut self, uidl: &Uidl, session: &mut ClientSession) -> Result<(), ClientError> {
        self.strip_dimensions = uidl.bool_attribute(ATTR_STRIP);

        if !self.sizing.is_measured() {
            self.sizing.remeasure(session.dom(), self.element);
        }

        if session.update_component(self, uidl)? {
            return Ok(());
        }

        self.click_enabled = uidl
            .string_array_attribute(ATTR_EVENT_LISTENERS)
            .contains(&LAYOUT_CLICK_EVENT);

        self.sizing.update_actual_size(session.dom(), self.element);
        let space = self.sizing.allocated_space(session.dom(), self.element);

        let mut stats = ReconcileStats::default();
        let mut rendered = 0;

        for child_uidl in uidl.rendered_children() {
            let child_pid = session.get_or_create_paintable(child_uidl)?;
            let child_element = session
                .element_of(&child_pid)
                .ok_or_else(|| ClientError::UnresolvedPaintable(child_pid.clone()))?;

            let current = session.dom().children(self.element);
            if current.get(rendered) != Some(&child_element) {
                if current.contains(&child_element) {
                    stats.moved += 1;
                } else {
                    stats.mounted += 1;
                }
                session.dom_mut().insert_child(self.element, child_element, rendered);
                session.set_parent(&child_pid, &self.pid);
            }

            session.set_allocated_space(&child_pid, space);
            if let Err(e) = session.update_paintable(&child_pid, child_uidl) {
                warn!("{}: child {} failed to update: {}", self.pid, child_pid, e);
                session.report_error(e);
            }

            self.strip_child(child_element, session.dom_mut());
            rendered += 1;
        }

        stats.removed = self.remove_children_after(rendered, session);

        // cached and invisible children skipped their own size update
        self.update_relative_sizes(session);
        session.dom_mut().run_overflow_auto_fix(self.element);

        debug!("{}: {:?}", self.pid, stats);
        self.last_stats = stats;
        Ok(())
    }

    // inline sizes of children go away on axes where the container itself has no size
    fn strip_child(&self, child: ElementId, dom: &mut dyn Dom) {
        if !self.strip_dimensions {
            return;
        }
        if !self.sizing.has_width() {
            dom.clear_style_property(child, STYLE_WIDTH);
        }
        if !self.sizing.has_height() {
            dom.clear_style_property(child, STYLE_HEIGHT);
        }
    }

    fn remove_children_after(&mut self, pos: usize, session: &mut ClientSession) -> usize {
        let stale: Vec<ElementId> = session.dom().children(self.element).into_iter().skip(pos).collect();
        for element in stale.iter() {
            session.dom_mut().remove_child(self.element, *element);
            if let Some(pid) = session.pid_for_element(*element).cloned() {
                session.unregister_paintable(&pid);
            }
        }
        stale.len()
    }

    fn after_resize(&mut self, session: &mut ClientSession) {
        if self.render_state.is_rendering() {
            return;
        }
        self.sizing.update_actual_size(session.dom(), self.element);
        self.update_relative_sizes(session);
        session.dom_mut().run_overflow_auto_fix(self.element);
    }

    fn update_relative_sizes(&self, session: &mut ClientSession) {
        let space = self.sizing.allocated_space(session.dom(), self.element);
        for child in self.mounted_children(session) {
            session.set_allocated_space(&child, space);
            session.handle_component_relative_size(&child);
        }
    }

    // the direct child element of ours that contains target, None for our own element
    fn child_element_containing(&self, target: ElementId, dom: &dyn Dom) -> Option<ElementId> {
        let mut current = target;
        loop {
            let parent = dom.parent(current)?;
            if parent == self.element {
                return Some(current);
            }
            current = parent;
        }
    }

    fn ensure_measured(&mut self, session: &ClientSession) {
        if !self.sizing.is_measured() {
            self.sizing.remeasure(session.dom(), self.element);
        }
    }
}

impl Paintable for VSimpleLayout {
    fn pid(&self) -> &Pid {
        &self.pid
    }

    fn typename(&self) -> &'static str {
        "VSimpleLayout"
    }

    fn element(&self) -> ElementId {
        self.element
    }

    fn style_primary_name(&self) -> &str {
        CLASSNAME
    }

    fn update_from_uidl(&mut self, uidl: &Uidl, session: &mut ClientSession) -> Result<(), ClientError> {
        self.render_state = RenderState::Rendering;
        let result = self.render(uidl, session);
        self.render_state = RenderState::Idle;
        result
    }

    fn set_width(&mut self, width: Option<i32>, session: &mut ClientSession) {
        self.ensure_measured(session);
        let scoped = self.scoped_class_name();
        self.sizing.set_explicit_width(width, session.dom_mut(), self.element, &scoped);
        self.after_resize(session);
    }

    fn set_height(&mut self, height: Option<i32>, session: &mut ClientSession) {
        self.ensure_measured(session);
        let scoped = self.scoped_class_name();
        self.sizing.set_explicit_height(height, session.dom_mut(), self.element, &scoped);
        self.after_resize(session);
    }

    fn set_style_name(&mut self, style: &str, session: &mut ClientSession) {
        session.dom_mut().set_class_names(self.element, style);
        if self.sizing.has_rule() {
            let scoped = self.scoped_class_name();
            session.dom_mut().add_class_name(self.element, &scoped);
        }

        if session.dom().is_attached(self.element) && self.last_style_name.as_deref() != Some(style) {
            self.sizing.remeasure(session.dom(), self.element);
            self.last_style_name = Some(style.to_string());
        }
    }

    fn handle_click(&self, target: ElementId, details: &MouseDetails, session: &ClientSession) -> Option<VariableChange> {
        if !self.click_enabled {
            return None;
        }

        let child = self
            .child_element_containing(target, session.dom())
            .and_then(|el| session.pid_for_element(el).cloned());
        let payload = LayoutClickPayload {
            child,
            details: *details,
        };

        match serde_json::to_value(&payload) {
            Ok(value) => Some(VariableChange::new(self.pid.clone(), LAYOUT_CLICK_EVENT, value, true)),
            Err(e) => {
                warn!("{}: failed to encode click: {}", self.pid, e);
                None
            }
        }
    }

    fn as_container(&self) -> Option<&dyn Container> {
        Some(self)
    }

    fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Container for VSimpleLayout {
    fn allocated_space(&self, _child: &Pid, session: &ClientSession) -> RenderSpace {
        self.sizing.allocated_space(session.dom(), self.element)
    }

    fn has_child_component(&self, child: &Pid, session: &ClientSession) -> bool {
        session
            .element_of(child)
            .map(|el| session.dom().parent(el) == Some(self.element))
            .unwrap_or(false)
    }

    fn replace_child_component(&mut self, old: &Pid, new: &Pid, session: &mut ClientSession) {
        let (old_el, new_el) = match (session.element_of(old), session.element_of(new)) {
            (Some(o), Some(n)) => (o, n),
            _ => return,
        };
        let index = match session.dom().children(self.element).iter().position(|el| *el == old_el) {
            Some(idx) => idx,
            None => return,
        };

        session.dom_mut().remove_child(self.element, old_el);
        session.clear_parent(old);
        session.dom_mut().insert_child(self.element, new_el, index);
        session.set_parent(new, &self.pid);
    }

    fn remove_child_component(&mut self, child: &Pid, session: &mut ClientSession) -> bool {
        let element = match session.element_of(child) {
            Some(el) => el,
            None => return false,
        };
        if !session.dom_mut().remove_child(self.element, element) {
            return false;
        }
        session.clear_parent(child);
        true
    }

    fn request_layout(&mut self, children: &[Pid], session: &mut ClientSession) -> bool {
        for child in children {
            if let Some(el) = session.element_of(child) {
                self.strip_child(el, session.dom_mut());
            }
        }
        session.dom_mut().run_overflow_auto_fix(self.element);
        // size may depend on the children unless both axes are fixed
        self.sizing.has_width() && self.sizing.has_height()
    }

    fn update_caption(&mut self, _child: &Pid, _uidl: &Uidl) {
        // captions, icons and error indicators are not rendered by this layout
    }
}
