//! The measured box tree produced by layout.
//!
//! A [`LayoutBox`] is an axis-aligned box with a width, a height above its
//! baseline, and a depth below it. Children are positioned relative to the
//! parent's origin, which sits at the left end of the parent's baseline
//! with y growing upward. Boxes are plain immutable data; a renderer walks
//! the tree with [`LayoutBox::walk`] and paints glyphs and rules at the
//! absolute offsets it is handed, with no further layout logic.

/// A 2-D offset in points. `y` is positive above the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset, positive up.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Component-wise sum.
    #[must_use]
    pub fn offset(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// What a box draws, if anything. Containers and kerns carry no payload.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxPayload {
    /// Nothing to draw; the box only positions its children.
    None,
    /// A glyph (or multi-character run) at a font size. The renderer draws
    /// it with its baseline on the box's baseline.
    Glyph {
        /// Glyph text.
        text: String,
        /// Font size in points the glyph is set at.
        size: f64,
    },
    /// A filled rule covering the box's full extent.
    Rule,
    /// Pure spacing. Identical to `None` for drawing; kept distinct so
    /// renderers and tests can tell spacing from structure.
    Kern,
}

/// One child with its offset from the parent's origin.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxChild {
    /// Offset of the child's origin from the parent's origin.
    pub offset: Point,
    /// The child box.
    pub node: LayoutBox,
}

/// One node of the layout output tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    /// Horizontal extent.
    pub width: f64,
    /// Extent above the baseline. Never negative.
    pub height: f64,
    /// Extent below the baseline. Never negative.
    pub depth: f64,
    /// What the box draws.
    pub payload: BoxPayload,
    /// Positioned children.
    pub children: Vec<BoxChild>,
}

impl LayoutBox {
    /// An empty box with zero extent.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            depth: 0.0,
            payload: BoxPayload::None,
            children: Vec::new(),
        }
    }

    /// A glyph leaf with explicit extents.
    #[must_use]
    pub fn glyph(text: impl Into<String>, size: f64, width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
            payload: BoxPayload::Glyph {
                text: text.into(),
                size,
            },
            children: Vec::new(),
        }
    }

    /// A drawn rule of the given extent.
    #[must_use]
    pub fn rule(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
            payload: BoxPayload::Rule,
            children: Vec::new(),
        }
    }

    /// A horizontal kern of the given width (may be negative).
    #[must_use]
    pub fn kern(width: f64) -> Self {
        Self {
            width,
            height: 0.0,
            depth: 0.0,
            payload: BoxPayload::Kern,
            children: Vec::new(),
        }
    }

    /// Wraps positioned children in a container, computing the extents
    /// from the children's boxes and offsets. An empty child list yields
    /// an empty box.
    #[must_use]
    pub fn container(children: Vec<BoxChild>) -> Self {
        let mut width: f64 = 0.0;
        let mut height: f64 = 0.0;
        let mut depth: f64 = 0.0;
        for child in &children {
            width = width.max(child.offset.x + child.node.width);
            height = height.max(child.offset.y + child.node.height);
            depth = depth.max(child.node.depth - child.offset.y);
        }
        Self {
            width,
            height: height.max(0.0),
            depth: depth.max(0.0),
            payload: BoxPayload::None,
            children,
        }
    }

    /// Lays out boxes left to right on a shared baseline.
    #[must_use]
    pub fn hbox(boxes: Vec<Self>) -> Self {
        let mut children = Vec::with_capacity(boxes.len());
        let mut x = 0.0;
        for node in boxes {
            let advance = node.width;
            children.push(BoxChild {
                offset: Point::new(x, 0.0),
                node,
            });
            x += advance;
        }
        let mut built = Self::container(children);
        // Kerns can be negative; trust the accumulated advance over the
        // children's bounding box.
        built.width = x.max(0.0);
        built
    }

    /// True if the box has no extent and draws nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0.0
            && self.height == 0.0
            && self.depth == 0.0
            && self.children.is_empty()
            && matches!(self.payload, BoxPayload::None | BoxPayload::Kern)
    }

    /// Visits every box in the tree with its absolute offset, parents
    /// before children.
    pub fn walk<F: FnMut(Point, &LayoutBox)>(&self, f: &mut F) {
        self.walk_from(Point::zero(), f);
    }

    fn walk_from<F: FnMut(Point, &LayoutBox)>(&self, origin: Point, f: &mut F) {
        f(origin, self);
        for child in &self.children {
            child.node.walk_from(origin.offset(child.offset), f);
        }
    }
}
