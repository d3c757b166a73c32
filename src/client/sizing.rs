use log::debug;

use crate::client::dom::{Dom, ElementId, RuleId, STYLE_HEIGHT, STYLE_WIDTH};
use crate::primitives::box_model::{Axis, BoxModelMetrics};
use crate::primitives::render_space::RenderSpace;

pub const UNKNOWN_SIZE: i32 = -1;

/*
Turns the outer pixel sizes a container gets from its parent into content sizes. Sizes go into
a style rule scoped to the one element (`.{primary}-{pid}`) instead of the inline style, so a
stylesheet can still override them.
 */
#[derive(Debug)]
pub struct SizingEngine {
    metrics: BoxModelMetrics,
    measured: bool,
    has_width: bool,
    has_height: bool,
    width: i32,
    height: i32,
    rule: Option<RuleId>,
}

impl Default for SizingEngine {
    fn default() -> Self {
        SizingEngine {
            metrics: BoxModelMetrics::ZERO,
            measured: false,
            has_width: false,
            has_height: false,
            width: UNKNOWN_SIZE,
            height: UNKNOWN_SIZE,
            rule: None,
        }
    }
}

impl SizingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metrics(&self) -> &BoxModelMetrics {
        &self.metrics
    }

    pub fn is_measured(&self) -> bool {
        self.measured
    }

    pub fn remeasure(&mut self, dom: &dyn Dom, element: ElementId) {
        self.metrics = dom.computed_box(element);
        self.measured = true;
    }

    pub fn has_width(&self) -> bool {
        self.has_width
    }

    pub fn has_height(&self) -> bool {
        self.has_height
    }

    /// Last measured content width, UNKNOWN_SIZE if never measured or not computable.
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn set_explicit_width(&mut self, outer: Option<i32>, dom: &mut dyn Dom, element: ElementId, scoped_class: &str) {
        self.has_width = outer.is_some();
        self.apply(outer, Axis::Horizontal, dom, element, scoped_class);
    }

    pub fn set_explicit_height(&mut self, outer: Option<i32>, dom: &mut dyn Dom, element: ElementId, scoped_class: &str) {
        self.has_height = outer.is_some();
        self.apply(outer, Axis::Vertical, dom, element, scoped_class);
    }

    fn apply(&mut self, outer: Option<i32>, axis: Axis, dom: &mut dyn Dom, element: ElementId, scoped_class: &str) {
        let property = match axis {
            Axis::Horizontal => STYLE_WIDTH,
            Axis::Vertical => STYLE_HEIGHT,
        };

        match outer {
            Some(outer) => {
                let inner = self.metrics.inner_size(outer, axis);
                let rule = match self.rule {
                    Some(rule) => rule,
                    None => {
                        let rule = dom.create_css_rule(&format!(".{}", scoped_class));
                        self.rule = Some(rule);
                        rule
                    }
                };
                dom.add_class_name(element, scoped_class);
                debug!("{} {}: outer {} inner {}", scoped_class, property, outer, inner);
                dom.set_rule_property(rule, property, &format!("{}px", inner));
            }
            None => {
                if let Some(rule) = self.rule {
                    dom.set_rule_property(rule, property, "");
                }
            }
        }
    }

    pub fn has_rule(&self) -> bool {
        self.rule.is_some()
    }

    pub fn update_actual_size(&mut self, dom: &dyn Dom, element: ElementId) {
        let size = dom.computed_size(element);
        self.width = size.width.unwrap_or(UNKNOWN_SIZE);
        self.height = size.height.unwrap_or(UNKNOWN_SIZE);
    }

    /// Content box of the container on the axes where its size is explicit.
    pub fn allocated_space(&self, dom: &dyn Dom, element: ElementId) -> RenderSpace {
        if !self.has_width && !self.has_height {
            return RenderSpace::UNDETERMINED;
        }

        let (offset_width, offset_height) = dom.offset_size(element);
        RenderSpace::new(
            self.has_width.then(|| offset_width - self.metrics.inner_extra(Axis::Horizontal)),
            self.has_height.then(|| offset_height - self.metrics.inner_extra(Axis::Vertical)),
        )
    }
}
