//! Figures as a tagged enum with floating point dimensions.

use std::f64::consts::PI;

use vc_core::{stable_hash, Contract, CopyMode, Duplicate, Operand};

/// A figure and the dimensions its shape needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Figure {
    /// Circle of the given radius.
    Circle {
        /// Radius.
        radius: f64,
    },
    /// Axis aligned rectangle.
    Rectangle {
        /// Length.
        length: f64,
        /// Width.
        width: f64,
    },
    /// Square of the given side.
    Square {
        /// Side.
        side: f64,
    },
}

impl Figure {
    /// Surface area.
    pub fn area(&self) -> f64 {
        match self {
            Figure::Circle { radius } => PI * radius * radius,
            Figure::Rectangle { length, width } => length * width,
            Figure::Square { side } => side * side,
        }
    }

    fn bit_key(&self) -> (u8, u64, u64) {
        match self {
            Figure::Circle { radius } => (0, radius.to_bits(), 0),
            Figure::Rectangle { length, width } => (1, length.to_bits(), width.to_bits()),
            Figure::Square { side } => (2, side.to_bits(), 0),
        }
    }

    /// IEEE equality and a bit-pattern hash. NaN breaks reflexivity and the
    /// two zeros break hash consistency.
    pub fn ieee_contract() -> Contract<Figure> {
        Contract::new(
            "figure-ieee",
            |lhs: &Figure, rhs: Operand<'_, Figure>| rhs.value().is_some_and(|rhs| lhs == rhs),
            |figure: &Figure| stable_hash(&figure.bit_key()),
        )
    }

    /// Bit-pattern equality and hash, consistent for every input.
    pub fn bitwise_contract() -> Contract<Figure> {
        Contract::new(
            "figure-bitwise",
            |lhs: &Figure, rhs: Operand<'_, Figure>| {
                rhs.value()
                    .is_some_and(|rhs| lhs.bit_key() == rhs.bit_key())
            },
            |figure: &Figure| stable_hash(&figure.bit_key()),
        )
    }

    /// Orders by area only, so different figures of equal area compare equal.
    pub fn area_ordered_contract() -> Contract<Figure> {
        Figure::bitwise_contract().with_order(|lhs: &Figure, rhs: &Figure| {
            lhs.area().total_cmp(&rhs.area())
        })
    }
}

impl Duplicate for Figure {
    fn duplicate(&self, _mode: CopyMode) -> Self {
        *self
    }
}
