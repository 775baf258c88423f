//! The markup entity and its kinds
//!
//! A markup is a 2D annotation drawn over the model: boxes, circles, clouds,
//! arrows, free-form paths, and text. Every kind shares a center `position`,
//! a bounding `size`, a `rotation` (radians, around the center), and a
//! [`MarkupStyle`]. Kind-specific shape data lives in [`MarkupGeometry`];
//! its points are stored relative to `position` so that moving a markup
//! never has to touch them.

use crate::{approx_eq, bounds_of, points_approx_eq, MarkupId, MarkupStyle, Point, Size};
use serde::{Deserialize, Serialize};

/// Kind of markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkupKind {
    Arrow,
    Rectangle,
    Circle,
    Cloud,
    Text,
    Callout,
    Freehand,
    Highlight,
    Polyline,
    Polycloud,
}

impl MarkupKind {
    /// Every kind, in toolbar order
    pub const ALL: [MarkupKind; 10] = [
        MarkupKind::Arrow,
        MarkupKind::Rectangle,
        MarkupKind::Circle,
        MarkupKind::Cloud,
        MarkupKind::Text,
        MarkupKind::Callout,
        MarkupKind::Freehand,
        MarkupKind::Highlight,
        MarkupKind::Polyline,
        MarkupKind::Polycloud,
    ];

    /// Upper-case tag used in action type names ("RECTANGLE", "POLYCLOUD")
    pub fn tag(&self) -> &'static str {
        match self {
            MarkupKind::Arrow => "ARROW",
            MarkupKind::Rectangle => "RECTANGLE",
            MarkupKind::Circle => "CIRCLE",
            MarkupKind::Cloud => "CLOUD",
            MarkupKind::Text => "TEXT",
            MarkupKind::Callout => "CALLOUT",
            MarkupKind::Freehand => "FREEHAND",
            MarkupKind::Highlight => "HIGHLIGHT",
            MarkupKind::Polyline => "POLYLINE",
            MarkupKind::Polycloud => "POLYCLOUD",
        }
    }

    /// Human readable name for menus
    pub fn display_name(&self) -> &'static str {
        match self {
            MarkupKind::Arrow => "Arrow",
            MarkupKind::Rectangle => "Rectangle",
            MarkupKind::Circle => "Circle",
            MarkupKind::Cloud => "Cloud",
            MarkupKind::Text => "Text",
            MarkupKind::Callout => "Callout",
            MarkupKind::Freehand => "Freehand",
            MarkupKind::Highlight => "Highlight",
            MarkupKind::Polyline => "Polyline",
            MarkupKind::Polycloud => "Polycloud",
        }
    }

    /// Whether the kind carries editable text
    pub fn has_text(&self) -> bool {
        matches!(self, MarkupKind::Text | MarkupKind::Callout)
    }
}

impl std::fmt::Display for MarkupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Kind-specific shape data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkupGeometry {
    /// Fully described by position and size (rectangle, circle, cloud, text)
    Bounds,
    /// Arrow endpoints, relative to the markup position
    Arrow { tail: Point, head: Point },
    /// Vertex list relative to the markup position
    Path { points: Vec<Point>, closed: bool },
}

impl MarkupGeometry {
    pub fn approx_eq(&self, other: &MarkupGeometry) -> bool {
        match (self, other) {
            (MarkupGeometry::Bounds, MarkupGeometry::Bounds) => true,
            (
                MarkupGeometry::Arrow { tail: t1, head: h1 },
                MarkupGeometry::Arrow { tail: t2, head: h2 },
            ) => t1.approx_eq(t2) && h1.approx_eq(h2),
            (
                MarkupGeometry::Path { points: p1, closed: c1 },
                MarkupGeometry::Path { points: p2, closed: c2 },
            ) => c1 == c2 && points_approx_eq(p1, p2),
            _ => false,
        }
    }
}

impl Default for MarkupGeometry {
    fn default() -> Self {
        MarkupGeometry::Bounds
    }
}

/// A single markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Markup {
    pub id: MarkupId,
    pub kind: MarkupKind,
    /// Center of the bounding box
    pub position: Point,
    pub size: Size,
    /// Rotation around the center, in radians
    pub rotation: f64,
    pub style: MarkupStyle,
    /// Text content; empty for kinds without text
    pub text: String,
    pub geometry: MarkupGeometry,
}

impl Markup {
    /// Create a bounds-only markup of the given kind
    pub fn new(id: MarkupId, kind: MarkupKind, position: Point, size: Size) -> Self {
        Self {
            id,
            kind,
            position,
            size,
            rotation: 0.0,
            style: MarkupStyle::default(),
            text: String::new(),
            geometry: MarkupGeometry::Bounds,
        }
    }

    pub fn rectangle(id: MarkupId, position: Point, size: Size) -> Self {
        Self::new(id, MarkupKind::Rectangle, position, size)
    }

    pub fn circle(id: MarkupId, position: Point, size: Size) -> Self {
        Self::new(id, MarkupKind::Circle, position, size)
    }

    pub fn cloud(id: MarkupId, position: Point, size: Size) -> Self {
        Self::new(id, MarkupKind::Cloud, position, size)
    }

    /// Text box with the given content
    pub fn text(id: MarkupId, position: Point, size: Size, text: impl Into<String>) -> Self {
        let mut markup = Self::new(id, MarkupKind::Text, position, size);
        markup.text = text.into();
        markup
    }

    /// Callout box with the given content
    pub fn callout(id: MarkupId, position: Point, size: Size, text: impl Into<String>) -> Self {
        let mut markup = Self::new(id, MarkupKind::Callout, position, size);
        markup.text = text.into();
        markup
    }

    /// Arrow from `tail` to `head`, both in absolute markup space
    pub fn arrow(id: MarkupId, tail: Point, head: Point) -> Self {
        let position = Point::new((tail.x + head.x) / 2.0, (tail.y + head.y) / 2.0);
        let size = Size::new((head.x - tail.x).abs(), (head.y - tail.y).abs());
        let mut markup = Self::new(id, MarkupKind::Arrow, position, size);
        markup.geometry = MarkupGeometry::Arrow {
            tail: tail.offset(-position.x, -position.y),
            head: head.offset(-position.x, -position.y),
        };
        markup
    }

    pub fn freehand(id: MarkupId, points: &[Point]) -> Self {
        Self::path(id, MarkupKind::Freehand, points, false)
    }

    pub fn highlight(id: MarkupId, points: &[Point]) -> Self {
        Self::path(id, MarkupKind::Highlight, points, false)
    }

    pub fn polyline(id: MarkupId, points: &[Point], closed: bool) -> Self {
        Self::path(id, MarkupKind::Polyline, points, closed)
    }

    pub fn polycloud(id: MarkupId, points: &[Point]) -> Self {
        Self::path(id, MarkupKind::Polycloud, points, true)
    }

    /// Path markup from absolute vertices; position and size are the
    /// vertices' bounding box
    fn path(id: MarkupId, kind: MarkupKind, points: &[Point], closed: bool) -> Self {
        let (position, size) = bounds_of(points).unwrap_or((Point::ORIGIN, Size::ZERO));
        let mut markup = Self::new(id, kind, position, size);
        markup.geometry = MarkupGeometry::Path {
            points: points.iter().map(|p| p.offset(-position.x, -position.y)).collect(),
            closed,
        };
        markup
    }

    /// Builder: set the style
    pub fn with_style(mut self, style: MarkupStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder: set the rotation
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Geometry vertices translated into absolute markup space
    pub fn absolute_points(&self) -> Vec<Point> {
        let Point { x, y } = self.position;
        match &self.geometry {
            MarkupGeometry::Bounds => Vec::new(),
            MarkupGeometry::Arrow { tail, head } => vec![tail.offset(x, y), head.offset(x, y)],
            MarkupGeometry::Path { points, .. } => points.iter().map(|p| p.offset(x, y)).collect(),
        }
    }

    /// Whether a text markup has no visible content
    pub fn is_blank(&self) -> bool {
        self.kind.has_text() && self.text.trim().is_empty()
    }

    /// Equality with float fields compared within the geometry epsilon
    pub fn approx_eq(&self, other: &Markup) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.position.approx_eq(&other.position)
            && self.size.approx_eq(&other.size)
            && approx_eq(self.rotation, other.rotation)
            && self.style.approx_eq(&other.style)
            && self.text == other.text
            && self.geometry.approx_eq(&other.geometry)
    }
}
