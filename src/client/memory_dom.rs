use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

use log::warn;

use crate::client::dom::{Dom, ElementId, RuleId, STYLE_HEIGHT, STYLE_WIDTH};
use crate::primitives::box_model::{Axis, BoxModelMetrics};
use crate::primitives::dimension::Dimension;
use crate::primitives::render_space::RenderSpace;

#[derive(Debug)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: Vec<String>,
    inline: BTreeMap<String, String>,
    text: Option<String>,
    visible: bool,
    intrinsic: RenderSpace,
}

impl Node {
    fn new(tag: &str) -> Self {
        Node {
            tag: tag.to_string(),
            parent: None,
            children: Vec::new(),
            classes: Vec::new(),
            inline: BTreeMap::new(),
            text: None,
            visible: true,
            intrinsic: RenderSpace::UNDETERMINED,
        }
    }
}

#[derive(Debug)]
struct Rule {
    selector: String,
    properties: BTreeMap<String, String>,
}

/// Counters of structural operations, so tests can tell a no-op pass from a busy one.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DomOps {
    pub inserts: usize,
    pub removals: usize,
    pub overflow_fixes: usize,
}

/*
Arena backed document without a rendering engine. Box metrics come from a table keyed by class
name (what a stylesheet would give), content sizes from style rules, inline styles or a preset
intrinsic size, in that order of priority.
 */
#[derive(Debug)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    rules: Vec<Rule>,
    class_metrics: HashMap<String, BoxModelMetrics>,
    overflow_fixes: HashMap<ElementId, usize>,
    ops: DomOps,
}

impl Default for MemoryDom {
    fn default() -> Self {
        MemoryDom {
            nodes: vec![Node::new("body")],
            rules: Vec::new(),
            class_metrics: HashMap::new(),
            overflow_fixes: HashMap::new(),
            ops: DomOps::default(),
        }
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements with this class get these metrics. When several classes match, the later class wins.
    pub fn with_class_metrics(mut self, class_name: &str, metrics: BoxModelMetrics) -> Self {
        self.class_metrics.insert(class_name.to_string(), metrics);
        self
    }

    /// Size of the root element, i.e. the viewport.
    pub fn with_viewport(mut self, width: i32, height: i32) -> Self {
        self.nodes[0].intrinsic = RenderSpace::new(Some(width), Some(height));
        self
    }

    pub fn ops(&self) -> DomOps {
        self.ops
    }

    pub fn reset_ops(&mut self) {
        self.ops = DomOps::default();
    }

    pub fn overflow_fix_count(&self, element: ElementId) -> usize {
        self.overflow_fixes.get(&element).copied().unwrap_or(0)
    }

    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.node(element).and_then(|n| n.text.as_deref())
    }

    pub fn rule_property(&self, selector: &str, name: &str) -> Option<&str> {
        self.rules
            .iter()
            .rev()
            .find(|r| r.selector == selector)
            .and_then(|r| r.properties.get(name))
            .map(String::as_str)
    }

    pub fn rule_count(&self, selector: &str) -> usize {
        self.rules.iter().filter(|r| r.selector == selector).count()
    }

    fn node(&self, element: ElementId) -> Option<&Node> {
        self.nodes.get(element.0)
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(element.0)
    }

    fn detach(&mut self, child: ElementId) {
        let old_parent = match self.node_mut(child).and_then(|n| n.parent.take()) {
            Some(p) => p,
            None => return,
        };
        if let Some(p) = self.node_mut(old_parent) {
            p.children.retain(|c| *c != child);
        }
    }

    // content size on one axis: rule, then inline style, then intrinsic
    fn content_size(&self, node: &Node, axis: Axis) -> Option<i32> {
        let name = match axis {
            Axis::Horizontal => STYLE_WIDTH,
            Axis::Vertical => STYLE_HEIGHT,
        };

        let from_rule = self
            .rules
            .iter()
            .rev()
            .filter(|r| node.classes.iter().any(|c| r.selector.strip_prefix('.') == Some(c.as_str())))
            .find_map(|r| r.properties.get(name))
            .and_then(|v| Dimension::parse_pixels(v));
        if from_rule.is_some() {
            return from_rule;
        }

        let from_inline = node.inline.get(name).and_then(|v| Dimension::parse_pixels(v));
        if from_inline.is_some() {
            return from_inline;
        }

        match axis {
            Axis::Horizontal => node.intrinsic.width,
            Axis::Vertical => node.intrinsic.height,
        }
    }

    /// Indented textual picture of the tree under the root, one element per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.root(), 0, &mut out);
        out
    }

    fn dump_node(&self, element: ElementId, depth: usize, out: &mut String) {
        let node = match self.node(element) {
            Some(n) => n,
            None => return,
        };

        let _ = write!(out, "{}<{}", "  ".repeat(depth), node.tag);
        if !node.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", node.classes.join(" "));
        }
        if !node.inline.is_empty() {
            let style: Vec<String> = node.inline.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
            let _ = write!(out, " style=\"{}\"", style.join("; "));
        }
        if !node.visible {
            let _ = write!(out, " hidden");
        }
        out.push('>');
        if let Some(text) = node.text.as_ref() {
            out.push_str(text);
        }
        out.push('\n');

        for child in node.children.iter() {
            self.dump_node(*child, depth + 1, out);
        }
    }
}

impl Dom for MemoryDom {
    fn root(&self) -> ElementId {
        ElementId(0)
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Node::new(tag));
        ElementId(self.nodes.len() - 1)
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element).and_then(|n| n.parent)
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.node(element).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn insert_child(&mut self, parent: ElementId, child: ElementId, index: usize) {
        if self.node(parent).is_none() || self.node(child).is_none() || parent == child {
            warn!("ignoring insert of {} into {}", child, parent);
            return;
        }

        self.detach(child);
        if let Some(p) = self.node_mut(parent) {
            let index = index.min(p.children.len());
            p.children.insert(index, child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
        self.ops.inserts += 1;
    }

    fn remove_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        self.detach(child);
        self.ops.removals += 1;
        true
    }

    fn set_class_names(&mut self, element: ElementId, class_names: &str) {
        if let Some(node) = self.node_mut(element) {
            node.classes = class_names.split_whitespace().map(str::to_string).collect();
        }
    }

    fn add_class_name(&mut self, element: ElementId, class_name: &str) {
        if let Some(node) = self.node_mut(element) {
            if !node.classes.iter().any(|c| c == class_name) {
                node.classes.push(class_name.to_string());
            }
        }
    }

    fn class_names(&self, element: ElementId) -> Vec<String> {
        self.node(element).map(|n| n.classes.clone()).unwrap_or_default()
    }

    fn set_style_property(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.inline.insert(name.to_string(), value.to_string());
        }
    }

    fn clear_style_property(&mut self, element: ElementId, name: &str) {
        if let Some(node) = self.node_mut(element) {
            node.inline.remove(name);
        }
    }

    fn style_property(&self, element: ElementId, name: &str) -> Option<String> {
        self.node(element).and_then(|n| n.inline.get(name).cloned())
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.node_mut(element) {
            node.text = Some(text.to_string());
        }
    }

    fn set_visible(&mut self, element: ElementId, visible: bool) {
        if let Some(node) = self.node_mut(element) {
            node.visible = visible;
        }
    }

    fn is_visible(&self, element: ElementId) -> bool {
        self.node(element).map(|n| n.visible).unwrap_or(false)
    }

    fn create_css_rule(&mut self, selector: &str) -> RuleId {
        self.rules.push(Rule {
            selector: selector.to_string(),
            properties: BTreeMap::new(),
        });
        RuleId(self.rules.len() - 1)
    }

    fn set_rule_property(&mut self, rule: RuleId, name: &str, value: &str) {
        match self.rules.get_mut(rule.0) {
            Some(r) if value.is_empty() => {
                r.properties.remove(name);
            }
            Some(r) => {
                r.properties.insert(name.to_string(), value.to_string());
            }
            None => warn!("no rule {:?}", rule),
        }
    }

    fn computed_box(&self, element: ElementId) -> BoxModelMetrics {
        let node = match self.node(element) {
            Some(n) => n,
            None => return BoxModelMetrics::ZERO,
        };
        node.classes
            .iter()
            .rev()
            .find_map(|c| self.class_metrics.get(c))
            .copied()
            .unwrap_or(BoxModelMetrics::ZERO)
    }

    fn computed_size(&self, element: ElementId) -> RenderSpace {
        match self.node(element) {
            Some(node) if node.visible => RenderSpace::new(
                self.content_size(node, Axis::Horizontal),
                self.content_size(node, Axis::Vertical),
            ),
            _ => RenderSpace::UNDETERMINED,
        }
    }

    fn offset_size(&self, element: ElementId) -> (i32, i32) {
        let size = self.computed_size(element);
        let metrics = self.computed_box(element);
        (
            size.width.map(|w| w + metrics.inner_extra(Axis::Horizontal)).unwrap_or(0),
            size.height.map(|h| h + metrics.inner_extra(Axis::Vertical)).unwrap_or(0),
        )
    }

    fn run_overflow_auto_fix(&mut self, element: ElementId) {
        *self.overflow_fixes.entry(element).or_insert(0) += 1;
        self.ops.overflow_fixes += 1;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::primitives::box_model::Edges;

    use super::*;

    #[test]
    fn insert_moves_between_parents() {
        let mut dom = MemoryDom::new();
        let a = dom.create_element("div");
        let b = dom.create_element("div");
        let x = dom.create_element("span");
        let root = dom.root();
        dom.insert_child(root, a, 0);
        dom.insert_child(root, b, 1);

        dom.insert_child(a, x, 0);
        dom.insert_child(b, x, 7);
        assert!(dom.children(a).is_empty());
        assert_eq!(dom.children(b), vec![x]);
        assert_eq!(dom.parent(x), Some(b));
        assert_eq!(dom.ops().inserts, 4);

        assert!(!dom.remove_child(a, x));
        assert!(dom.remove_child(b, x));
        assert_eq!(dom.parent(x), None);
    }

    #[test]
    fn rule_width_wins_over_inline() {
        let mut dom = MemoryDom::new().with_class_metrics(
            "box",
            BoxModelMetrics::new(Edges::uniform(10), Edges::uniform(1), Edges::uniform(5)),
        );
        let el = dom.create_element("div");
        dom.set_class_names(el, "box");
        dom.set_style_property(el, STYLE_WIDTH, "50px");
        assert_eq!(dom.computed_size(el).width, Some(50));

        let rule = dom.create_css_rule(".box");
        dom.set_rule_property(rule, STYLE_WIDTH, "80px");
        assert_eq!(dom.computed_size(el).width, Some(80));
        // padding and border, no margin
        assert_eq!(dom.offset_size(el), (92, 0));

        dom.set_rule_property(rule, STYLE_WIDTH, "");
        assert_eq!(dom.computed_size(el).width, Some(50));
    }

    #[test]
    fn later_class_metrics_win() {
        let mut dom = MemoryDom::new()
            .with_class_metrics("a", BoxModelMetrics::new(Edges::uniform(1), Edges::ZERO, Edges::ZERO))
            .with_class_metrics("b", BoxModelMetrics::new(Edges::uniform(2), Edges::ZERO, Edges::ZERO));
        let el = dom.create_element("div");
        dom.set_class_names(el, "b a");
        assert_eq!(dom.computed_box(el).margin, Edges::uniform(1));
        dom.add_class_name(el, "b");
        assert_eq!(dom.computed_box(el).margin, Edges::uniform(1));
    }

    #[test]
    fn dump_shows_structure() {
        let mut dom = MemoryDom::new();
        let el = dom.create_element("div");
        dom.set_class_names(el, "v-label");
        dom.set_text(el, "hello");
        let root = dom.root();
        dom.insert_child(root, el, 0);
        assert_eq!(dom.dump(), "<body>\n  <div class=\"v-label\">hello\n");
    }
}
