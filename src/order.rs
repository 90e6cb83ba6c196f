//! Ordering mode of a heap
//!
//! A heap is either a max-heap (largest priority at the root) or a min-heap.
//! The mode is fixed at construction and supplies the `better` comparator
//! every repair walk is written against.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Which end of the priority order sits at the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeapOrder {
    /// Largest priority first.
    #[default]
    Max,
    /// Smallest priority first.
    Min,
}

impl HeapOrder {
    /// Returns true if `a` ranks strictly ahead of `b`.
    #[inline]
    pub fn better<P: Ord + ?Sized>(self, a: &P, b: &P) -> bool {
        match self {
            HeapOrder::Max => a > b,
            HeapOrder::Min => a < b,
        }
    }

    /// Returns true if `a` ranks ahead of or level with `b`.
    #[inline]
    pub fn better_or_equal<P: Ord + ?Sized>(self, a: &P, b: &P) -> bool {
        !self.better(b, a)
    }

    /// The token accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            HeapOrder::Max => "max",
            HeapOrder::Min => "min",
        }
    }
}

impl FromStr for HeapOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" => Ok(HeapOrder::Max),
            "min" => Ok(HeapOrder::Min),
            _ => Err(ConfigError::InvalidOrdering {
                token: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HeapOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_better_is_strict() {
        assert!(HeapOrder::Max.better(&5, &3));
        assert!(!HeapOrder::Max.better(&3, &3));
        assert!(HeapOrder::Min.better(&3, &5));
        assert!(!HeapOrder::Min.better(&5, &5));
    }

    #[test]
    fn test_better_or_equal() {
        assert!(HeapOrder::Max.better_or_equal(&3, &3));
        assert!(!HeapOrder::Max.better_or_equal(&2, &3));
        assert!(HeapOrder::Min.better_or_equal(&2, &3));
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!("max".parse::<HeapOrder>(), Ok(HeapOrder::Max));
        assert_eq!(" MIN ".parse::<HeapOrder>(), Ok(HeapOrder::Min));
        assert_eq!(
            "median".parse::<HeapOrder>(),
            Err(ConfigError::InvalidOrdering {
                token: "median".to_string()
            })
        );
        assert_eq!(HeapOrder::Min.to_string(), "min");
    }
}
