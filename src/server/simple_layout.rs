use log::{debug, warn};
use serde_json::json;

use crate::server::click_event::LayoutClickEvent;
use crate::server::component::{subtree_contains, Component, ComponentRef, ComponentState};
use crate::server::layout::{Layout, MarginInfo};
use crate::server::layout_error::{LayoutError, MARGIN_UNSUPPORTED};
use crate::server::listeners::{ListenerId, ListenerList};
use crate::uidl::paint_error::PaintError;
use crate::uidl::paint_target::PaintTarget;
use crate::uidl::uidl::{Uidl, ATTR_EVENT_LISTENERS};
use crate::uidl::variable_change::{LayoutClickPayload, VariableChange, LAYOUT_CLICK_EVENT};
use crate::widget::widget::{get_new_widget_id, WID};

pub const ATTR_STRIP: &str = "strip";

#[derive(Clone, Debug)]
struct ChildEntry {
    id: WID,
    component: ComponentRef,
}

/*
Snapshot of the children of a layout, as it goes to the client: one descriptor per child in
layout order, plus the strip flag that applies to all of them.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct ChildSnapshot {
    pub strip: bool,
    pub children: Vec<Uidl>,
}

/*
Layout that keeps its children in a plain ordered list and leaves everything else (spacing,
margins, alignment) to CSS on the client side.

When created with strip_dimensions, every added component gets an undefined size and the client
removes any inline sizes from the children, on each axis on which the layout itself has
undefined size.
 */
pub struct SimpleLayout {
    id: WID,
    state: ComponentState,
    strip_dimensions: bool,
    components: Vec<ChildEntry>,
    click_listeners: ListenerList<LayoutClickEvent>,
}

impl SimpleLayout {
    pub const TAG: &'static str = "simplelayout";

    pub fn new() -> Self {
        SimpleLayout {
            id: get_new_widget_id(),
            state: ComponentState::default(),
            strip_dimensions: false,
            components: Vec::new(),
            click_listeners: ListenerList::new(),
        }
    }

    pub fn with_strip_dimensions(self, strip_dimensions: bool) -> Self {
        SimpleLayout {
            strip_dimensions,
            ..self
        }
    }

    pub fn strip_dimensions(&self) -> bool {
        self.strip_dimensions
    }

    /// Appends the component after the last one.
    pub fn add_component(&mut self, child: ComponentRef) -> Result<(), LayoutError> {
        let idx = self.components.len();
        self.insert_at(child, idx)
    }

    /*
    Appends and then sets the given sizes, None leaves the size as it is. A size that does not
    parse is reported, but the component stays added.
     */
    pub fn add_component_with_size(
        &mut self,
        child: ComponentRef,
        width: Option<&str>,
        height: Option<&str>,
    ) -> Result<(), LayoutError> {
        self.add_component(child.clone())?;

        let mut guard = child.write();
        if let Some(width) = width {
            guard.state_mut().set_width_str(width)?;
        }
        if let Some(height) = height {
            guard.state_mut().set_height_str(height)?;
        }
        Ok(())
    }

    /// Inserts the component at index, the components at and after index move one forward.
    pub fn add_component_at(&mut self, child: ComponentRef, index: usize) -> Result<(), LayoutError> {
        self.insert_at(child, index)
    }

    /*
    The list is changed first and the container level validation runs after it, so on failure
    the inserted slot is taken out again and the list is exactly what it was before the call.
     */
    fn insert_at(&mut self, child: ComponentRef, index: usize) -> Result<(), LayoutError> {
        if index > self.components.len() {
            return Err(LayoutError::IndexOutOfBounds {
                index,
                len: self.components.len(),
            });
        }

        self.components.insert(index, ChildEntry {
            id: child.id(),
            component: child.clone(),
        });

        if let Err(e) = self.attach(&child) {
            self.components.remove(index);
            debug!("rejected child {} of layout {}: {}", child.id(), self.id, e);
            return Err(e);
        }

        self.state.request_repaint();

        if self.strip_dimensions {
            child.write().state_mut().set_size_undefined();
        }
        Ok(())
    }

    fn attach(&self, child: &ComponentRef) -> Result<(), LayoutError> {
        let wid = child.id();
        if wid == self.id || subtree_contains(child, self.id) {
            return Err(LayoutError::WouldCreateCycle(wid));
        }
        if self.components.iter().filter(|e| e.id == wid).count() > 1 {
            return Err(LayoutError::DuplicateChild(wid));
        }

        let mut guard = child.write();
        match guard.state().parent() {
            Some(parent) if parent == self.id => return Err(LayoutError::DuplicateChild(wid)),
            Some(parent) => return Err(LayoutError::AlreadyAttached { child: wid, parent }),
            None => {}
        }
        guard.state_mut().set_parent(Some(self.id));
        Ok(())
    }

    /*
    Removal always updates the list first, then lets go of the component wherever it is attached
    to us. Removing something that is not a child is harmless, returns false.
     */
    pub fn remove_component(&mut self, child: &ComponentRef) -> bool {
        let before = self.components.len();
        self.components.retain(|e| e.id != child.id());
        let removed = before != self.components.len();

        if child.id() != self.id {
            let mut guard = child.write();
            if guard.state().parent() == Some(self.id) {
                guard.state_mut().set_parent(None);
            }
        }

        self.state.request_repaint();
        removed
    }

    /*
    Puts `new` where `old` was:
     - old is not a child: new is appended (which fails if new already is a child),
     - only old is a child: old is removed and new takes its index,
     - both are children: they swap places, nobody else moves.
     */
    pub fn replace_component(&mut self, old: &ComponentRef, new: &ComponentRef) -> Result<(), LayoutError> {
        let old_location = self.component_index(old);
        let new_location = self.component_index(new);

        match (old_location, new_location) {
            (None, _) => self.add_component(new.clone()),
            (Some(old_idx), None) => {
                self.remove_component(old);
                if let Err(e) = self.insert_at(new.clone(), old_idx) {
                    if let Err(e2) = self.insert_at(old.clone(), old_idx) {
                        warn!("failed to restore {} after failed replace: {}", old.id(), e2);
                    }
                    return Err(e);
                }
                Ok(())
            }
            (Some(old_idx), Some(new_idx)) => {
                self.components.swap(old_idx, new_idx);
                self.state.request_repaint();
                Ok(())
            }
        }
    }

    pub fn component_index(&self, child: &ComponentRef) -> Option<usize> {
        self.components.iter().position(|e| e.id == child.id())
    }

    pub fn component(&self, index: usize) -> Option<ComponentRef> {
        self.components.get(index).map(|e| e.component.clone())
    }

    pub fn components(&self) -> impl Iterator<Item = &ComponentRef> {
        self.components.iter().map(|e| &e.component)
    }

    pub fn size(&self) -> usize {
        self.components.len()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn mark_clean(&mut self) {
        self.state.mark_clean()
    }

    pub fn add_click_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&LayoutClickEvent) + Send + Sync + 'static,
    {
        let id = self.click_listeners.add(listener);
        // the client has to start sending clicks
        self.state.request_repaint();
        id
    }

    pub fn remove_click_listener(&mut self, id: ListenerId) -> bool {
        let removed = self.click_listeners.remove(id);
        if removed {
            self.state.request_repaint();
        }
        removed
    }

    fn fire_click(&self, change: &VariableChange) {
        let payload = match serde_json::from_value::<LayoutClickPayload>(change.value.clone()) {
            Ok(p) => p,
            Err(e) => {
                warn!("malformed {} from {}: {}", LAYOUT_CLICK_EVENT, change.pid, e);
                return;
            }
        };

        let child = payload
            .child
            .as_ref()
            .and_then(|pid| pid.widget_id())
            .filter(|wid| self.components.iter().any(|e| e.id == *wid));

        if payload.child.is_some() && child.is_none() {
            debug!("click on {:?} which is no longer a child of {}", payload.child, self.id);
        }

        let event = LayoutClickEvent {
            source: self.id,
            child,
            details: payload.details,
        };
        self.click_listeners.fire(&event);
    }
}

impl Default for SimpleLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Descriptors of all children of the layout, in layout order.
pub fn serialize_children(layout: &SimpleLayout) -> Result<ChildSnapshot, PaintError> {
    let mut target = PaintTarget::new();
    for child in layout.components() {
        child.read().paint(&mut target)?;
    }

    Ok(ChildSnapshot {
        strip: layout.strip_dimensions(),
        children: target.into_uidls()?,
    })
}

impl Component for SimpleLayout {
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
        let snapshot = serialize_children(self)?;

        if snapshot.strip {
            target.add_attribute(ATTR_STRIP, true)?;
        }
        if !self.click_listeners.is_empty() {
            target.add_attribute(ATTR_EVENT_LISTENERS, json!([LAYOUT_CLICK_EVENT]))?;
        }

        for child in snapshot.children {
            target.add_child(child)?;
        }
        Ok(())
    }

    fn change_variables(&mut self, changes: &[VariableChange]) {
        for change in changes {
            if change.name == LAYOUT_CLICK_EVENT {
                self.fire_click(change);
            } else {
                debug!("layout {} ignores variable {}", self.id, change.name);
            }
        }
    }

    fn children(&self) -> Vec<ComponentRef> {
        self.components().cloned().collect()
    }
}

impl Layout for SimpleLayout {
    fn set_margin(&mut self, _enabled: bool) -> Result<(), LayoutError> {
        Err(LayoutError::Unsupported(MARGIN_UNSUPPORTED))
    }

    fn set_margin_info(&mut self, _margins: MarginInfo) -> Result<(), LayoutError> {
        Err(LayoutError::Unsupported(MARGIN_UNSUPPORTED))
    }

    fn set_margins(&mut self, _top: bool, _right: bool, _bottom: bool, _left: bool) -> Result<(), LayoutError> {
        Err(LayoutError::Unsupported(MARGIN_UNSUPPORTED))
    }

    fn margin(&self) -> Result<MarginInfo, LayoutError> {
        Err(LayoutError::Unsupported(MARGIN_UNSUPPORTED))
    }
}
