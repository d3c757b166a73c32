use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::uidl::paint_error::PaintError;
use crate::uidl::pid::Pid;

pub const ATTR_ID: &str = "id";
pub const ATTR_WIDTH: &str = "width";
pub const ATTR_HEIGHT: &str = "height";
pub const ATTR_STYLE: &str = "style";
pub const ATTR_INVISIBLE: &str = "invisible";
pub const ATTR_CACHED: &str = "cached";
pub const ATTR_EVENT_LISTENERS: &str = "eventListeners";

/*
Children tagged like this are never rendered. Subclasses of a layout may append one (always as
the last child) to carry their own metadata.
 */
pub const OUT_OF_BAND_TAG: &str = "custom";

/*
One node of the user interface definition sent from server to client: what kind of paintable it
describes, its attributes and (for containers) the descriptors of its children, in order.
 */
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Uidl {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Uidl>,
}

impl Uidl {
    pub fn new(tag: impl Into<String>) -> Self {
        Uidl {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn with_child(mut self, child: Uidl) -> Self {
        self.children.push(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_out_of_band(&self) -> bool {
        self.tag == OUT_OF_BAND_TAG
    }

    pub fn id(&self) -> Option<Pid> {
        self.string_attribute(ATTR_ID).map(Pid::new)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn string_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    /// Missing attribute reads as false, same as a present `false`.
    pub fn bool_attribute(&self, name: &str) -> bool {
        self.attributes.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn string_array_attribute(&self, name: &str) -> Vec<&str> {
        match self.attributes.get(name) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, idx: usize) -> Option<&Uidl> {
        self.children.get(idx)
    }

    /// Children that are actually rendered, i.e. without the out-of-band ones.
    pub fn rendered_children(&self) -> impl Iterator<Item = &Uidl> {
        self.children.iter().filter(|c| !c.is_out_of_band())
    }

    pub fn to_json(&self) -> Result<String, PaintError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Uidl, PaintError> {
        Ok(serde_json::from_str(s)?)
    }
}
