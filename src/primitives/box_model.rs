use std::fmt;
use std::fmt::Formatter;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/*
Pixel sizes along the four edges of a box, in CSS order (top, right, bottom, left).
 */
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Edges {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Edges {
    pub const ZERO: Edges = Edges::new(0, 0, 0, 0);

    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Edges { top, right, bottom, left }
    }

    pub const fn uniform(px: i32) -> Self {
        Edges::new(px, px, px, px)
    }

    /// Sum of left and right edges.
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Sum of top and bottom edges.
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

impl Add for Edges {
    type Output = Edges;

    fn add(self, rhs: Self) -> Self::Output {
        Edges::new(
            self.top + rhs.top,
            self.right + rhs.right,
            self.bottom + rhs.bottom,
            self.left + rhs.left,
        )
    }
}

impl fmt::Display for Edges {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}px {}px {}px", self.top, self.right, self.bottom, self.left)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/*
Margin, border and padding of one element as the document computed them. Measuring is not free,
so containers keep a copy and refresh it only when their style name changes.
 */
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BoxModelMetrics {
    pub margin: Edges,
    pub border: Edges,
    pub padding: Edges,
}

impl BoxModelMetrics {
    pub const ZERO: BoxModelMetrics = BoxModelMetrics {
        margin: Edges::ZERO,
        border: Edges::ZERO,
        padding: Edges::ZERO,
    };

    pub fn new(margin: Edges, border: Edges, padding: Edges) -> Self {
        BoxModelMetrics { margin, border, padding }
    }

    /// Everything that separates an outer size from the content size on given axis.
    pub fn outer_extra(&self, axis: Axis) -> i32 {
        let all = self.margin + self.border + self.padding;
        match axis {
            Axis::Horizontal => all.horizontal(),
            Axis::Vertical => all.vertical(),
        }
    }

    /// Border and padding only, which is what an offset size contains on top of the content.
    pub fn inner_extra(&self, axis: Axis) -> i32 {
        let all = self.border + self.padding;
        match axis {
            Axis::Horizontal => all.horizontal(),
            Axis::Vertical => all.vertical(),
        }
    }

    /// Converts an outer pixel size into the content size, never going below zero.
    pub fn inner_size(&self, outer: i32, axis: Axis) -> i32 {
        (outer - self.outer_extra(axis)).max(0)
    }
}
