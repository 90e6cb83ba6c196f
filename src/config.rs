//! Construction parameters for [`DHeap`](crate::dheap::DHeap)

use crate::error::ConfigError;
use crate::order::HeapOrder;

/// Smallest legal branching factor.
pub const MIN_BRANCHING_FACTOR: usize = 2;

/// Branching factor and ordering mode of a heap.
///
/// The defaults (binary max-heap) match what a bare `DHeap::default()` builds.
///
/// # Example
///
/// ```rust
/// use rust_dary_heap::{HeapConfig, HeapOrder};
///
/// let config = HeapConfig::new().branching_factor(4).order(HeapOrder::Min);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.branching_factor, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapConfig {
    /// Number of children per internal node.
    pub branching_factor: usize,
    /// Which end of the order sits at the root.
    pub order: HeapOrder,
}

impl HeapConfig {
    /// Binary max-heap.
    pub fn new() -> Self {
        HeapConfig {
            branching_factor: MIN_BRANCHING_FACTOR,
            order: HeapOrder::Max,
        }
    }

    /// Sets the branching factor.
    pub fn branching_factor(mut self, d: usize) -> Self {
        self.branching_factor = d;
        self
    }

    /// Sets the ordering mode.
    pub fn order(mut self, order: HeapOrder) -> Self {
        self.order = order;
        self
    }

    /// Builds a config from a branching factor and an ordering token (`"max"` or `"min"`).
    pub fn from_tokens(branching_factor: usize, order: &str) -> Result<Self, ConfigError> {
        let config = HeapConfig {
            branching_factor,
            order: order.parse()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the branching factor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.branching_factor < MIN_BRANCHING_FACTOR {
            return Err(ConfigError::InvalidBranchingFactor {
                given: self.branching_factor,
            });
        }
        Ok(())
    }
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self::new()
    }
}
