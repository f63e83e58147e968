use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::interpreter::registry::DivisionPolicy;

/// Settings for an [`Executor`](crate::executor::Executor).
///
/// Every field has a default, so a partial document deserializes.
///
/// # Example
/// ```
/// use rpncalc::{ExecutorConfig, interpreter::registry::DivisionPolicy};
///
/// let config = ExecutorConfig { division_by_zero: DivisionPolicy::Infinity,
///                               ..ExecutorConfig::default() };
/// assert_eq!(config.cache_capacity, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// What division by an exactly zero divisor does.
    pub division_by_zero: DivisionPolicy,
    /// Maximum number of cached postfix sequences. `None` keeps every
    /// expression ever executed; otherwise the oldest entry is evicted first.
    pub cache_capacity:   Option<NonZeroUsize>,
}
