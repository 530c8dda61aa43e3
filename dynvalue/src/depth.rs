//! The recursion budget threaded through every conversion.
//!
//! Each structural descent (into an array element, an object field, an
//! optional payload, a map entry or a tagged union) spends one unit of
//! budget. Scalar conversions spend nothing, and neither do `Box`, `Rc` and
//! `Arc`, which cannot be null. A budget of zero means no further descent
//! is allowed, which turns unbounded recursion on hostile input into a
//! [`RecursionLimitExceeded`](crate::ErrorKind::RecursionLimitExceeded) error.

use std::sync::OnceLock;

use crate::error::{ErrorKind, VariantError};
use crate::tracing_macros::debug;

/// Budget used when no explicit budget is given and
/// [`set_default_budget`] was never called.
pub const DEFAULT_MAX_DEPTH: u32 = 1000;

static DEFAULT_BUDGET: OnceLock<u32> = OnceLock::new();

/// Installs the process-wide default budget.
///
/// Meant to be called once at startup. Only the first call has an effect;
/// every later call fails with
/// [`DefaultBudgetAlreadySet`](crate::ErrorKind::DefaultBudgetAlreadySet),
/// reporting the budget the winning call installed.
pub fn set_default_budget(budget: u32) -> Result<(), VariantError> {
    // A losing `set` waits for the winner to finish, so `current` is never stale.
    DEFAULT_BUDGET.set(budget).map_err(|_| {
        VariantError::new(ErrorKind::DefaultBudgetAlreadySet {
            current: default_budget(),
        })
    })?;
    debug!(budget, "default recursion budget installed");
    Ok(())
}

/// Returns the process-wide default budget.
pub fn default_budget() -> u32 {
    DEFAULT_BUDGET.get().copied().unwrap_or(DEFAULT_MAX_DEPTH)
}

/// Remaining recursion budget for one top-level conversion.
///
/// `Depth` is `Copy` and passed by value: each call receives its own budget,
/// so sibling elements of a container all start from the same remaining
/// depth.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Depth(u32);

impl Depth {
    /// Creates a budget allowing `levels` structural descents.
    pub const fn new(levels: u32) -> Self {
        Self(levels)
    }

    /// Number of descents still allowed.
    pub const fn remaining(self) -> u32 {
        self.0
    }

    /// Spends one level of budget, failing when none is left.
    #[inline]
    pub fn descend(self) -> Result<Depth, VariantError> {
        match self.0.checked_sub(1) {
            Some(rest) => Ok(Depth(rest)),
            None => {
                debug!("recursion budget exhausted");
                Err(VariantError::recursion_limit())
            }
        }
    }
}

impl Default for Depth {
    /// The process-wide default, see [`default_budget`].
    fn default() -> Self {
        Self(default_budget())
    }
}

impl From<u32> for Depth {
    fn from(levels: u32) -> Self {
        Self(levels)
    }
}
