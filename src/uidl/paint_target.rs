use serde_json::Value;

use crate::uidl::paint_error::PaintError;
use crate::uidl::uidl::Uidl;

/*
Streaming builder components paint themselves into: start_tag, attributes, children, end_tag.
Tags must be balanced, and exactly one root is expected when the target is finished.
 */
#[derive(Debug, Default)]
pub struct PaintTarget {
    open: Vec<Uidl>,
    finished: Vec<Uidl>,
}

impl PaintTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_tag(&mut self, tag: &str) {
        self.open.push(Uidl::new(tag));
    }

    pub fn add_attribute(&mut self, name: &str, value: impl Into<Value>) -> Result<(), PaintError> {
        match self.open.last_mut() {
            Some(node) => {
                node.attributes.insert(name.to_string(), value.into());
                Ok(())
            }
            None => Err(PaintError::AttributeOutsideTag(name.to_string())),
        }
    }

    /// Appends an already built descriptor as the last child of the innermost open tag.
    pub fn add_child(&mut self, child: Uidl) -> Result<(), PaintError> {
        match self.open.last_mut() {
            Some(node) => {
                node.children.push(child);
                Ok(())
            }
            None => Err(PaintError::ChildOutsideTag(child.tag)),
        }
    }

    pub fn end_tag(&mut self, tag: &str) -> Result<(), PaintError> {
        let node = self.open.pop().ok_or_else(|| PaintError::NoOpenTag(tag.to_string()))?;
        if node.tag != tag {
            let expected = node.tag.clone();
            self.open.push(node);
            return Err(PaintError::UnbalancedTag {
                expected,
                found: tag.to_string(),
            });
        }

        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.finished.push(node),
        }
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Consumes the target, returning the single painted root.
    pub fn into_uidl(mut self) -> Result<Uidl, PaintError> {
        if !self.open.is_empty() {
            return Err(PaintError::Unclosed(self.open.len()));
        }
        if self.finished.len() > 1 {
            return Err(PaintError::MultipleRoots);
        }
        self.finished.pop().ok_or(PaintError::Empty)
    }

    /// Consumes the target, returning every painted root in paint order.
    pub fn into_uidls(self) -> Result<Vec<Uidl>, PaintError> {
        if !self.open.is_empty() {
            return Err(PaintError::Unclosed(self.open.len()));
        }
        Ok(self.finished)
    }
}
