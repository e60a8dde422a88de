//! Explicit shallow and deep duplication.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Selects how shared components are treated when a value is duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyMode {
    /// Reference-counted components are shared with the original.
    Shallow,
    /// Reference-counted components are rebuilt recursively.
    Deep,
}

impl CopyMode {
    /// Stable lowercase name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyMode::Shallow => "shallow",
            CopyMode::Deep => "deep",
        }
    }
}

/// Types that can be duplicated under an explicit [`CopyMode`].
///
/// Plain values copy by value in both modes. The modes only differ for
/// shared ownership (`Rc`, `Arc`): shallow duplicates alias the original
/// allocation, deep duplicates own a fresh one. Cyclic structures are not
/// detected; deep-duplicating a cycle does not terminate.
pub trait Duplicate: Sized {
    /// Returns a copy of `self` built according to `mode`.
    fn duplicate(&self, mode: CopyMode) -> Self;
}

/// Duplicates `value` under `mode`.
pub fn duplicate<T: Duplicate>(value: &T, mode: CopyMode) -> T {
    value.duplicate(mode)
}

macro_rules! duplicate_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Duplicate for $ty {
                fn duplicate(&self, _mode: CopyMode) -> Self {
                    self.clone()
                }
            }
        )*
    };
}

duplicate_by_value!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
);

impl<T: Duplicate> Duplicate for Vec<T> {
    fn duplicate(&self, mode: CopyMode) -> Self {
        self.iter().map(|item| item.duplicate(mode)).collect()
    }
}

impl<T: Duplicate> Duplicate for Option<T> {
    fn duplicate(&self, mode: CopyMode) -> Self {
        self.as_ref().map(|item| item.duplicate(mode))
    }
}

impl<T: Duplicate> Duplicate for Box<T> {
    fn duplicate(&self, mode: CopyMode) -> Self {
        Box::new(self.as_ref().duplicate(mode))
    }
}

impl<K: Ord + Clone, V: Duplicate> Duplicate for BTreeMap<K, V> {
    fn duplicate(&self, mode: CopyMode) -> Self {
        self.iter()
            .map(|(key, value)| (key.clone(), value.duplicate(mode)))
            .collect()
    }
}

impl<T: Duplicate> Duplicate for RefCell<T> {
    /// # Panics
    ///
    /// Panics if the cell is mutably borrowed while being duplicated.
    fn duplicate(&self, mode: CopyMode) -> Self {
        RefCell::new(self.borrow().duplicate(mode))
    }
}

impl<T: Duplicate> Duplicate for Rc<T> {
    fn duplicate(&self, mode: CopyMode) -> Self {
        match mode {
            CopyMode::Shallow => Rc::clone(self),
            CopyMode::Deep => Rc::new(self.as_ref().duplicate(mode)),
        }
    }
}

impl<T: Duplicate> Duplicate for Arc<T> {
    fn duplicate(&self, mode: CopyMode) -> Self {
        match mode {
            CopyMode::Shallow => Arc::clone(self),
            CopyMode::Deep => Arc::new(self.as_ref().duplicate(mode)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_vec_of_cells_aliases() {
        let original = vec![Rc::new(RefCell::new(1u32)), Rc::new(RefCell::new(2u32))];
        let copy = duplicate(&original, CopyMode::Shallow);
        *original[0].borrow_mut() = 10;
        assert_eq!(*copy[0].borrow(), 10);
        assert!(Rc::ptr_eq(&original[1], &copy[1]));
    }

    #[test]
    fn deep_vec_of_cells_is_independent() {
        let original = vec![Rc::new(RefCell::new(1u32))];
        let copy = duplicate(&original, CopyMode::Deep);
        *original[0].borrow_mut() = 10;
        assert_eq!(*copy[0].borrow(), 1);
        assert!(!Rc::ptr_eq(&original[0], &copy[0]));
    }

    #[test]
    fn plain_values_ignore_mode() {
        let text = String::from("java");
        assert_eq!(text.duplicate(CopyMode::Shallow), text.duplicate(CopyMode::Deep));
    }
}
