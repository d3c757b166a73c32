use std::any::Any;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::primitives::box_model::BoxModelMetrics;
use crate::primitives::render_space::RenderSpace;

pub const STYLE_WIDTH: &str = "width";
pub const STYLE_HEIGHT: &str = "height";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ElementId(pub usize);

impl Display for ElementId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RuleId(pub usize);

/*
The document paintables render into. Only what the client widgets actually use is here: a tree
of elements with class names, inline styles and visibility, a global list of style rules, and
the measurements a browser would compute from all of that.
 */
pub trait Dom {
    fn root(&self) -> ElementId;

    fn create_element(&mut self, tag: &str) -> ElementId;

    fn parent(&self, element: ElementId) -> Option<ElementId>;

    fn children(&self, element: ElementId) -> Vec<ElementId>;

    /*
    Inserts child at index among parent's children, detaching it from its current parent first.
    Index past the end appends.
     */
    fn insert_child(&mut self, parent: ElementId, child: ElementId, index: usize);

    fn remove_child(&mut self, parent: ElementId, child: ElementId) -> bool;

    fn set_class_names(&mut self, element: ElementId, class_names: &str);

    fn add_class_name(&mut self, element: ElementId, class_name: &str);

    fn class_names(&self, element: ElementId) -> Vec<String>;

    fn set_style_property(&mut self, element: ElementId, name: &str, value: &str);

    fn clear_style_property(&mut self, element: ElementId, name: &str);

    fn style_property(&self, element: ElementId, name: &str) -> Option<String>;

    fn set_text(&mut self, element: ElementId, text: &str);

    fn set_visible(&mut self, element: ElementId, visible: bool);

    fn is_visible(&self, element: ElementId) -> bool;

    fn create_css_rule(&mut self, selector: &str) -> RuleId;

    // empty value removes the property from the rule
    fn set_rule_property(&mut self, rule: RuleId, name: &str, value: &str);

    fn computed_box(&self, element: ElementId) -> BoxModelMetrics;

    /// Computed content size, None on an axis the document cannot tell.
    fn computed_size(&self, element: ElementId) -> RenderSpace;

    /// Content plus padding plus border, 0 on unknown axes.
    fn offset_size(&self, element: ElementId) -> (i32, i32);

    /*
    Forces the document to recompute overflow (scrollbars) of the element. Some engines leave
    them stale after the content changed size.
     */
    fn run_overflow_auto_fix(&mut self, element: ElementId);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<'a> dyn Dom + 'a {
    pub fn as_dom<T: Dom + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn as_dom_mut<T: Dom + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// True if `descendant` is `ancestor` or somewhere below it.
    pub fn is_or_contains(&self, ancestor: ElementId, descendant: ElementId) -> bool {
        let mut current = Some(descendant);
        while let Some(el) = current {
            if el == ancestor {
                return true;
            }
            current = self.parent(el);
        }
        false
    }

    pub fn is_attached(&self, element: ElementId) -> bool {
        self.is_or_contains(self.root(), element)
    }
}
