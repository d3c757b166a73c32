use std::collections::{HashMap, HashSet};

use crossbeam_channel::Sender;
use log::{debug, error, warn};
use serde_json::Value;
use uuid::Uuid;

use crate::client::client_error::ClientError;
use crate::client::dom::{Dom, ElementId};
use crate::client::paintable::Paintable;
use crate::client::v_button::VButton;
use crate::client::v_label::VLabel;
use crate::client::v_simple_layout::VSimpleLayout;
use crate::primitives::dimension::Dimension;
use crate::primitives::render_space::{RelativeSize, RenderSpace};
use crate::server::button::Button;
use crate::server::label::Label;
use crate::server::simple_layout::SimpleLayout;
use crate::uidl::pid::Pid;
use crate::uidl::uidl::{Uidl, ATTR_CACHED, ATTR_HEIGHT, ATTR_INVISIBLE, ATTR_STYLE, ATTR_WIDTH};
use crate::uidl::variable_change::{MouseDetails, VariableChange};

pub type PaintableFactory = fn(&Pid, &mut ClientSession) -> Box<dyn Paintable>;

/*
Everything a client connection knows: the document, the paintables by identity, which
container holds which paintable and how much space it gave it, and the two ways out (errors and
variable changes for the server).

A paintable is taken out of the index while it is being updated, so it can get the session
mutably. Asking for it during that time gives ClientError::CyclicUpdate.
 */
pub struct ClientSession {
    id: Uuid,
    dom: Box<dyn Dom>,
    paintables: HashMap<Pid, Box<dyn Paintable>>,
    elements: HashMap<Pid, ElementId>,
    element_index: HashMap<ElementId, Pid>,
    updating: HashSet<Pid>,
    parents: HashMap<Pid, Pid>,
    allocated: HashMap<Pid, RenderSpace>,
    relative: HashMap<Pid, RelativeSize>,
    factories: HashMap<String, PaintableFactory>,
    installed_rules: HashSet<String>,
    root: Option<Pid>,
    errors: Sender<ClientError>,
    outbox: Sender<VariableChange>,
}

impl ClientSession {
    pub fn new(dom: Box<dyn Dom>, errors: Sender<ClientError>, outbox: Sender<VariableChange>) -> Self {
        let mut session = ClientSession {
            id: Uuid::new_v4(),
            dom,
            paintables: HashMap::new(),
            elements: HashMap::new(),
            element_index: HashMap::new(),
            updating: HashSet::new(),
            parents: HashMap::new(),
            allocated: HashMap::new(),
            relative: HashMap::new(),
            factories: HashMap::new(),
            installed_rules: HashSet::new(),
            root: None,
            errors,
            outbox,
        };

        session.register_factory(SimpleLayout::TAG, VSimpleLayout::factory);
        session.register_factory(Label::TAG, VLabel::factory);
        session.register_factory(Button::TAG, VButton::factory);
        session
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn register_factory(&mut self, tag: &str, factory: PaintableFactory) {
        self.factories.insert(tag.to_string(), factory);
    }

    pub fn dom(&self) -> &dyn Dom {
        self.dom.as_ref()
    }

    pub fn dom_mut(&mut self) -> &mut dyn Dom {
        self.dom.as_mut()
    }

    pub fn root_pid(&self) -> Option<&Pid> {
        self.root.as_ref()
    }

    pub fn handle_json(&mut self, json: &str) -> Result<(), ClientError> {
        let uidl = match Uidl::from_json(json) {
            Ok(uidl) => uidl,
            Err(e) => {
                let e = ClientError::from(e);
                error!("session {}: {}", self.id, e);
                self.report_error(e.clone());
                return Err(e);
            }
        };
        self.handle_uidl(&uidl)
    }

    /// Applies a full snapshot of the root paintable. Errors are also reported to the error channel.
    pub fn handle_uidl(&mut self, uidl: &Uidl) -> Result<(), ClientError> {
        let result = self.paint_root(uidl);
        if let Err(e) = &result {
            error!("session {}: pass failed: {}", self.id, e);
            self.report_error(e.clone());
        }
        result
    }

    fn paint_root(&mut self, uidl: &Uidl) -> Result<(), ClientError> {
        let pid = self.get_or_create_paintable(uidl)?;

        if let Some(old_root) = self.root.clone() {
            if old_root != pid {
                debug!("root changes from {} to {}", old_root, pid);
                // the new root may live somewhere in the old tree, take it out before dropping that
                self.clear_parent(&pid);
                if let Some(el) = self.element_of(&pid) {
                    if let Some(parent) = self.dom.parent(el) {
                        self.dom.remove_child(parent, el);
                    }
                }
                if let Some(el) = self.element_of(&old_root) {
                    let body = self.dom.root();
                    self.dom.remove_child(body, el);
                }
                self.unregister_paintable(&old_root);
            }
        }
        self.root = Some(pid.clone());

        let element = self.element_of(&pid).ok_or_else(|| ClientError::UnresolvedPaintable(pid.clone()))?;
        let body = self.dom.root();
        if self.dom.parent(element) != Some(body) {
            self.dom.insert_child(body, element, 0);
        }
        let viewport = self.dom.computed_size(body);
        self.set_allocated_space(&pid, viewport);

        self.update_paintable(&pid, uidl)
    }

    /*
    Identity lookup: the registered paintable for the descriptor's id, or a new one made by the
    factory of its tag.
     */
    pub fn get_or_create_paintable(&mut self, uidl: &Uidl) -> Result<Pid, ClientError> {
        let pid = uidl.id().ok_or_else(|| ClientError::MissingIdentity {
            tag: uidl.tag().to_string(),
        })?;

        if self.updating.contains(&pid) {
            return Err(ClientError::CyclicUpdate(pid));
        }
        if self.paintables.contains_key(&pid) {
            return Ok(pid);
        }

        let factory = *self
            .factories
            .get(uidl.tag())
            .ok_or_else(|| ClientError::UnknownTag(uidl.tag().to_string()))?;
        let paintable = factory(&pid, self);
        debug!("created {} {}", paintable.typename(), pid);

        let element = paintable.element();
        self.elements.insert(pid.clone(), element);
        self.element_index.insert(element, pid.clone());
        self.paintables.insert(pid.clone(), paintable);
        Ok(pid)
    }

    pub fn update_paintable(&mut self, pid: &Pid, uidl: &Uidl) -> Result<(), ClientError> {
        self.with_paintable(pid, |paintable, session| paintable.update_from_uidl(uidl, session))
            .and_then(|result| result)
    }

    /*
    Runs f with the paintable taken out of the index. If the paintable got unregistered in the
    meantime, it is dropped afterwards.
     */
    pub fn with_paintable<R, F>(&mut self, pid: &Pid, f: F) -> Result<R, ClientError>
    where
        F: FnOnce(&mut dyn Paintable, &mut ClientSession) -> R,
    {
        if self.updating.contains(pid) {
            return Err(ClientError::CyclicUpdate(pid.clone()));
        }
        let mut paintable = self
            .paintables
            .remove(pid)
            .ok_or_else(|| ClientError::UnresolvedPaintable(pid.clone()))?;

        self.updating.insert(pid.clone());
        let result = f(paintable.as_mut(), self);
        self.updating.remove(pid);

        if self.elements.contains_key(pid) {
            self.paintables.insert(pid.clone(), paintable);
        } else {
            debug!("{} was unregistered during its own update", pid);
        }
        Ok(result)
    }

    pub fn paintable(&self, pid: &Pid) -> Option<&dyn Paintable> {
        self.paintables.get(pid).map(|p| p.as_ref())
    }

    pub fn paintable_as<T: Paintable>(&self, pid: &Pid) -> Option<&T> {
        self.paintable(pid).and_then(|p| p.as_paintable::<T>())
    }

    pub fn is_registered(&self, pid: &Pid) -> bool {
        self.elements.contains_key(pid)
    }

    pub fn paintable_count(&self) -> usize {
        self.elements.len()
    }

    pub fn element_of(&self, pid: &Pid) -> Option<ElementId> {
        self.elements.get(pid).copied()
    }

    pub fn pid_for_element(&self, element: ElementId) -> Option<&Pid> {
        self.element_index.get(&element)
    }

    /// Drops the paintable and, recursively, everything that has it as a parent.
    pub fn unregister_paintable(&mut self, pid: &Pid) {
        let children: Vec<Pid> = self
            .parents
            .iter()
            .filter(|(_, parent)| *parent == pid)
            .map(|(child, _)| child.clone())
            .collect();
        for child in children.iter() {
            self.unregister_paintable(child);
        }

        self.paintables.remove(pid);
        if let Some(element) = self.elements.remove(pid) {
            self.element_index.remove(&element);
        }
        self.parents.remove(pid);
        self.allocated.remove(pid);
        self.relative.remove(pid);
        if self.root.as_ref() == Some(pid) {
            self.root = None;
        }
        debug!("unregistered {}", pid);
    }

    pub fn set_parent(&mut self, child: &Pid, parent: &Pid) {
        self.parents.insert(child.clone(), parent.clone());
    }

    pub fn clear_parent(&mut self, child: &Pid) {
        self.parents.remove(child);
    }

    pub fn parent_of(&self, child: &Pid) -> Option<&Pid> {
        self.parents.get(child)
    }

    pub fn set_allocated_space(&mut self, child: &Pid, space: RenderSpace) {
        self.allocated.insert(child.clone(), space);
    }

    /// Space the parent published for this paintable, undetermined if none was published.
    pub fn allocated_space_for(&self, pid: &Pid) -> RenderSpace {
        self.allocated.get(pid).copied().unwrap_or(RenderSpace::UNDETERMINED)
    }

    pub fn relative_size(&self, pid: &Pid) -> Option<RelativeSize> {
        self.relative.get(pid).copied()
    }

    /*
    Generic attributes every paintable has. Returns true when the paintable must not continue
    its update: nothing changed (cached) or it is invisible.
     */
    pub fn update_component(&mut self, paintable: &mut dyn Paintable, uidl: &Uidl) -> Result<bool, ClientError> {
        let element = paintable.element();

        if uidl.bool_attribute(ATTR_CACHED) {
            return Ok(true);
        }
        if uidl.bool_attribute(ATTR_INVISIBLE) {
            self.dom.set_visible(element, false);
            return Ok(true);
        }
        self.dom.set_visible(element, true);

        let primary = paintable.style_primary_name().to_string();
        let mut style = primary.clone();
        match uidl.attribute(ATTR_STYLE) {
            None => {}
            Some(Value::String(extra)) => {
                for name in extra.split_whitespace() {
                    style.push_str(&format!(" {}-{}", primary, name));
                }
            }
            Some(other) => return Err(malformed(paintable.pid(), ATTR_STYLE, other)),
        }
        paintable.set_style_name(&style, self);

        self.update_component_size(paintable, uidl)?;
        Ok(false)
    }

    fn update_component_size(&mut self, paintable: &mut dyn Paintable, uidl: &Uidl) -> Result<(), ClientError> {
        let pid = paintable.pid().clone();
        let width = size_attribute(&pid, uidl, ATTR_WIDTH)?;
        let height = size_attribute(&pid, uidl, ATTR_HEIGHT)?;
        let space = self.allocated_space_for(&pid);

        let mut relative = RelativeSize::default();
        let width = match width {
            Dimension::Pixels(px) => Some(px),
            Dimension::Percent(pct) => {
                relative.width = Some(pct);
                space.width.map(|w| RelativeSize::resolve(pct, w))
            }
            Dimension::Undefined => None,
        };
        let height = match height {
            Dimension::Pixels(px) => Some(px),
            Dimension::Percent(pct) => {
                relative.height = Some(pct);
                space.height.map(|h| RelativeSize::resolve(pct, h))
            }
            Dimension::Undefined => None,
        };

        if relative.is_empty() {
            self.relative.remove(&pid);
        } else {
            self.relative.insert(pid.clone(), relative);
        }

        paintable.set_width(width, self);
        paintable.set_height(height, self);
        Ok(())
    }

    /*
    Recomputes the pixel size of a paintable with percent sizes from the space its parent
    published. Returns false if there was nothing to do.
     */
    pub fn handle_component_relative_size(&mut self, pid: &Pid) -> bool {
        let relative = match self.relative.get(pid) {
            Some(r) => *r,
            None => return false,
        };
        let space = self.allocated_space_for(pid);
        let width = relative.width.map(|pct| space.width.map(|w| RelativeSize::resolve(pct, w)));
        let height = relative.height.map(|pct| space.height.map(|h| RelativeSize::resolve(pct, h)));

        let result = self.with_paintable(pid, |paintable, session| {
            if let Some(width) = width {
                paintable.set_width(width, session);
            }
            if let Some(height) = height {
                paintable.set_height(height, session);
            }
        });

        match result {
            Ok(()) => true,
            Err(e) => {
                debug!("relative size of {} not applied: {}", pid, e);
                false
            }
        }
    }

    /// Sets the outer width of a registered paintable from outside of any pass.
    pub fn set_width(&mut self, pid: &Pid, width: Option<i32>) -> Result<(), ClientError> {
        self.with_paintable(pid, |paintable, session| paintable.set_width(width, session))
    }

    pub fn set_height(&mut self, pid: &Pid, height: Option<i32>) -> Result<(), ClientError> {
        self.with_paintable(pid, |paintable, session| paintable.set_height(height, session))
    }

    /// Installs a global style rule unless this session already did.
    pub fn ensure_rule(&mut self, selector: &str, properties: &[(&str, &str)]) {
        if !self.installed_rules.insert(selector.to_string()) {
            return;
        }
        let rule = self.dom.create_css_rule(selector);
        for (name, value) in properties {
            self.dom.set_rule_property(rule, name, value);
        }
    }

    pub fn report_error(&self, e: ClientError) {
        if self.errors.send(e).is_err() {
            warn!("session {}: error channel closed", self.id);
        }
    }

    pub fn send_variable(&self, change: VariableChange) {
        debug!("session {}: {} {} = {}", self.id, change.pid, change.name, change.value);
        if self.outbox.send(change).is_err() {
            warn!("session {}: outbox closed", self.id);
        }
    }

    /*
    Delivers a click on `target` to the nearest paintable at or above it that reacts to clicks.
    Returns true if one did.
     */
    pub fn dispatch_click(&self, target: ElementId, details: MouseDetails) -> bool {
        let mut current = Some(target);
        while let Some(element) = current {
            if let Some(paintable) = self.element_index.get(&element).and_then(|pid| self.paintables.get(pid)) {
                if let Some(change) = paintable.handle_click(target, &details, self) {
                    self.send_variable(change);
                    return true;
                }
            }
            current = self.dom.parent(element);
        }
        debug!("click on {} reached no paintable", target);
        false
    }
}

fn size_attribute(pid: &Pid, uidl: &Uidl, name: &str) -> Result<Dimension, ClientError> {
    match uidl.attribute(name) {
        None => Ok(Dimension::Undefined),
        Some(Value::String(s)) => Dimension::parse(s).map_err(|_| ClientError::MalformedAttribute {
            pid: pid.clone(),
            name: name.to_string(),
            value: s.clone(),
        }),
        Some(other) => Err(malformed(pid, name, other)),
    }
}

pub fn malformed(pid: &Pid, name: &str, value: &Value) -> ClientError {
    ClientError::MalformedAttribute {
        pid: pid.clone(),
        name: name.to_string(),
        value: value.to_string(),
    }
}
