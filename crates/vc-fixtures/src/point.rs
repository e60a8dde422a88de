//! Points with extension fields: the lenient tagged form that loses
//! transitivity, and the composed form that keeps every rule.

use vc_core::{Contract, CopyMode, Duplicate, HashBuilder, Operand};

/// Integer point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate.
    pub fn y(&self) -> i32 {
        self.y
    }
}

/// Color attached to a colored point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    /// Red.
    Red,
    /// Green.
    Green,
    /// Blue.
    Blue,
}

/// Discriminator for the extension carried by a [`TaggedPoint`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PointKind {
    /// No extension.
    Plain,
    /// Extended with a color.
    Colored(Color),
    /// Extended with a smell.
    Smelly(String),
}

/// A point plus an optional extension, discriminated by [`PointKind`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaggedPoint {
    point: Point,
    kind: PointKind,
}

impl TaggedPoint {
    /// Plain point.
    pub fn plain(x: i32, y: i32) -> Self {
        Self {
            point: Point::new(x, y),
            kind: PointKind::Plain,
        }
    }

    /// Colored point.
    pub fn colored(x: i32, y: i32, color: Color) -> Self {
        Self {
            point: Point::new(x, y),
            kind: PointKind::Colored(color),
        }
    }

    /// Smelly point.
    pub fn smelly(x: i32, y: i32, smell: impl Into<String>) -> Self {
        Self {
            point: Point::new(x, y),
            kind: PointKind::Smelly(smell.into()),
        }
    }

    /// The underlying point.
    pub fn point(&self) -> Point {
        self.point
    }

    /// The extension discriminator.
    pub fn kind(&self) -> &PointKind {
        &self.kind
    }

    /// Same-kind points compare extensions; any mixed comparison falls back to
    /// the coordinates alone. A plain point therefore bridges two colored
    /// points of different colors, which breaks transitivity.
    pub fn lenient_contract() -> Contract<TaggedPoint> {
        Contract::new(
            "point-lenient",
            |lhs: &TaggedPoint, rhs: Operand<'_, TaggedPoint>| {
                let Some(rhs) = rhs.value() else {
                    return false;
                };
                if lhs.point != rhs.point {
                    return false;
                }
                match (&lhs.kind, &rhs.kind) {
                    (PointKind::Colored(a), PointKind::Colored(b)) => a == b,
                    (PointKind::Smelly(a), PointKind::Smelly(b)) => a == b,
                    _ => true,
                }
            },
            |point: &TaggedPoint| HashBuilder::new().field(&point.point).finish(),
        )
    }

    /// Points of different kinds are never equal.
    pub fn tagged_contract() -> Contract<TaggedPoint> {
        Contract::derived("point-tagged")
    }
}

/// A point composed with a color. Equality covers the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorPoint {
    point: Point,
    color: Color,
}

impl ColorPoint {
    /// Creates a colored point.
    pub const fn new(x: i32, y: i32, color: Color) -> Self {
        Self {
            point: Point::new(x, y),
            color,
        }
    }

    /// Point view of this colored point.
    pub fn as_point(&self) -> Point {
        self.point
    }

    /// The color component.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Contract derived from the record's own impls, ordered by point then color.
    pub fn contract() -> Contract<ColorPoint> {
        Contract::derived_ordered("color-point")
    }
}

impl Duplicate for ColorPoint {
    fn duplicate(&self, _mode: CopyMode) -> Self {
        *self
    }
}
