use std::fmt;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde_json::json;

use crate::primitives::dimension::{Dimension, DimensionError};
use crate::uidl::paint_error::PaintError;
use crate::uidl::paint_target::PaintTarget;
use crate::uidl::pid::Pid;
use crate::uidl::uidl::{ATTR_HEIGHT, ATTR_ID, ATTR_INVISIBLE, ATTR_STYLE, ATTR_WIDTH};
use crate::uidl::variable_change::VariableChange;
use crate::widget::widget::WID;

/*
State every server side component has, regardless of what it is: its size, extra style names,
visibility, which container it sits in and whether it has to be repainted.
 */
#[derive(Clone, Debug)]
pub struct ComponentState {
    width: Dimension,
    height: Dimension,
    style_names: Vec<String>,
    visible: bool,
    parent: Option<WID>,
    dirty: bool,
}

impl Default for ComponentState {
    fn default() -> Self {
        ComponentState {
            width: Dimension::Undefined,
            height: Dimension::Undefined,
            style_names: Vec::new(),
            visible: true,
            parent: None,
            // a fresh component was never sent to the client
            dirty: true,
        }
    }
}

impl ComponentState {
    pub fn width(&self) -> Dimension {
        self.width
    }

    pub fn height(&self) -> Dimension {
        self.height
    }

    pub fn set_width(&mut self, width: Dimension) {
        if self.width != width {
            self.width = width;
            self.request_repaint();
        }
    }

    pub fn set_height(&mut self, height: Dimension) {
        if self.height != height {
            self.height = height;
            self.request_repaint();
        }
    }

    pub fn set_width_str(&mut self, width: &str) -> Result<(), DimensionError> {
        self.set_width(Dimension::parse(width)?);
        Ok(())
    }

    pub fn set_height_str(&mut self, height: &str) -> Result<(), DimensionError> {
        self.set_height(Dimension::parse(height)?);
        Ok(())
    }

    pub fn set_size_undefined(&mut self) {
        self.set_width(Dimension::Undefined);
        self.set_height(Dimension::Undefined);
    }

    pub fn set_size_full(&mut self) {
        self.set_width(Dimension::FULL);
        self.set_height(Dimension::FULL);
    }

    pub fn style_names(&self) -> &[String] {
        &self.style_names
    }

    pub fn add_style_name(&mut self, style: &str) {
        for s in style.split_whitespace() {
            if !self.style_names.iter().any(|existing| existing == s) {
                self.style_names.push(s.to_string());
                self.request_repaint();
            }
        }
    }

    pub fn remove_style_name(&mut self, style: &str) {
        let before = self.style_names.len();
        self.style_names.retain(|s| s != style);
        if before != self.style_names.len() {
            self.request_repaint();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.request_repaint();
        }
    }

    pub fn parent(&self) -> Option<WID> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<WID>) {
        self.parent = parent;
    }

    pub fn request_repaint(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

pub trait Component: Send + Sync {
    fn id(&self) -> WID;

    // tag of the descriptor, which is also how the client picks the paintable implementation.
    fn tag(&self) -> &'static str;

    fn state(&self) -> &ComponentState;

    fn state_mut(&mut self) -> &mut ComponentState;

    fn paint_content(&self, target: &mut PaintTarget) -> Result<(), PaintError>;

    fn change_variables(&mut self, _changes: &[VariableChange]) {}

    fn children(&self) -> Vec<ComponentRef> {
        Vec::new()
    }

    fn pid(&self) -> Pid {
        Pid::for_widget(self.id())
    }

    fn paint(&self, target: &mut PaintTarget) -> Result<(), PaintError> {
        let tag = self.tag();
        target.start_tag(tag);
        paint_common_attributes(self.id(), self.state(), target)?;
        // an invisible component sends nothing but the fact it is invisible
        if self.state().is_visible() {
            self.paint_content(target)?;
        }
        target.end_tag(tag)
    }
}

pub fn paint_common_attributes(id: WID, state: &ComponentState, target: &mut PaintTarget) -> Result<(), PaintError> {
    target.add_attribute(ATTR_ID, Pid::for_widget(id).as_str())?;

    if !state.is_visible() {
        return target.add_attribute(ATTR_INVISIBLE, true);
    }
    if state.width().is_defined() {
        target.add_attribute(ATTR_WIDTH, state.width().to_string())?;
    }
    if state.height().is_defined() {
        target.add_attribute(ATTR_HEIGHT, state.height().to_string())?;
    }
    if !state.style_names().is_empty() {
        target.add_attribute(ATTR_STYLE, json!(state.style_names().join(" ")))?;
    }
    Ok(())
}

/*
Shared, lockable reference to any component. The identity is copied out of the component on
creation, so comparing or looking up children never needs the lock.
 */
#[derive(Clone)]
pub struct ComponentRef {
    id: WID,
    inner: Arc<RwLock<dyn Component>>,
}

impl ComponentRef {
    pub fn new<C: Component + 'static>(component: C) -> Self {
        ComponentHandle::new(component).as_component()
    }

    pub fn id(&self) -> WID {
        self.id
    }

    pub fn read(&self) -> RwLockReadGuard<'_, dyn Component> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, dyn Component> {
        self.inner.write()
    }
}

impl PartialEq for ComponentRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentRef {}

impl Debug for ComponentRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentRef({})", self.id)
    }
}

/*
Typed twin of ComponentRef, for code that created the component and wants its concrete API
(e.g. calling SimpleLayout::add_component on a layout that is itself a child somewhere).
 */
pub struct ComponentHandle<C: Component + 'static> {
    id: WID,
    inner: Arc<RwLock<C>>,
}

impl<C: Component + 'static> Clone for ComponentHandle<C> {
    fn clone(&self) -> Self {
        ComponentHandle {
            id: self.id,
            inner: self.inner.clone(),
        }
    }
}

impl<C: Component + 'static> ComponentHandle<C> {
    pub fn new(component: C) -> Self {
        ComponentHandle {
            id: component.id(),
            inner: Arc::new(RwLock::new(component)),
        }
    }

    pub fn id(&self) -> WID {
        self.id
    }

    pub fn read(&self) -> RwLockReadGuard<'_, C> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, C> {
        self.inner.write()
    }

    pub fn as_component(&self) -> ComponentRef {
        let inner: Arc<RwLock<dyn Component>> = self.inner.clone();
        ComponentRef { id: self.id, inner }
    }
}

/// Depth first search for the component with given pid, starting at (and including) root.
pub fn find_by_pid(root: &ComponentRef, pid: &Pid) -> Option<ComponentRef> {
    let wid = pid.widget_id()?;
    find_by_id(root, wid)
}

pub fn find_by_id(root: &ComponentRef, wid: WID) -> Option<ComponentRef> {
    if root.id() == wid {
        return Some(root.clone());
    }
    let children = root.read().children();
    children.iter().find_map(|c| find_by_id(c, wid))
}

/// True if `wid` is somewhere below `root` (root itself excluded). Never locks a node with id `wid`.
pub fn subtree_contains(root: &ComponentRef, wid: WID) -> bool {
    let children = root.read().children();
    children.iter().any(|c| c.id() == wid || subtree_contains(c, wid))
}
