//! Solution representation shared by the GRASP engine and problem evaluators.

use std::fmt;

/// A set of selected variable indices with a cached objective value.
///
/// Elements are kept in insertion order and are unique; the engine relies
/// on that order for deterministic neighborhood scans. `cost` caches the
/// objective of the current element set and is refreshed by
/// [`GraspProblem::evaluate`](crate::grasp::GraspProblem::evaluate) —
/// it is never patched incrementally.
///
/// Cloning produces an independent deep copy, so an incumbent solution
/// never aliases the working solution it was copied from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    elements: Vec<usize>,
    /// Cached objective value of the current element set.
    pub cost: f64,
}

impl Solution {
    /// Creates an empty solution.
    ///
    /// The all-zero assignment evaluates to 0.0, so the cache starts there.
    pub fn empty() -> Self {
        Self {
            elements: Vec::new(),
            cost: 0.0,
        }
    }

    /// Number of selected indices.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when no index is selected.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// True when `index` is selected.
    pub fn contains(&self, index: usize) -> bool {
        self.elements.contains(&index)
    }

    /// Selects `index`, appending it in iteration order.
    pub fn add(&mut self, index: usize) {
        debug_assert!(!self.contains(index), "index {index} already selected");
        self.elements.push(index);
    }

    /// Deselects `index`, preserving the order of the remaining elements.
    ///
    /// Returns `false` when `index` was not selected.
    pub fn remove(&mut self, index: usize) -> bool {
        match self.elements.iter().position(|&e| e == index) {
            Some(pos) => {
                self.elements.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Selected indices in insertion order.
    pub fn elements(&self) -> &[usize] {
        &self.elements
    }

    /// Iterates the selected indices in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.elements.iter()
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Solution: cost=[{}], size=[{}], elements={:?}",
            self.cost,
            self.elements.len(),
            self.elements
        )
    }
}
