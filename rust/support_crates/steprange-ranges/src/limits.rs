//! Bounds applied by the checked materialization paths.

use serde::{Deserialize, Serialize};
use steprange_common::{Result, verify_arg};

/// Default upper bound on the width of a single derived run.
pub const DEFAULT_MAX_RUN_LEN: u64 = 1 << 20;

/// Default upper bound on the total length of a materialized sequence.
pub const DEFAULT_MAX_SEQUENCE_LEN: u64 = 1 << 24;

/// Limits enforced by [`Range::try_collect`](crate::Range::try_collect) and by
/// the container's checked zip.
///
/// The unchecked paths (`iter`, `collect`, `zip`) ignore these limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivationLimits {
    /// Maximum number of values a single step pair may derive.
    pub max_run_len: u64,
    /// Maximum number of values a materialized sequence may hold.
    pub max_sequence_len: u64,
}

impl Default for DerivationLimits {
    fn default() -> Self {
        Self {
            max_run_len: DEFAULT_MAX_RUN_LEN,
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
        }
    }
}

impl DerivationLimits {
    /// Limits that accept everything.
    pub fn unbounded() -> Self {
        Self {
            max_run_len: u64::MAX,
            max_sequence_len: u64::MAX,
        }
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        verify_arg!(max_run_len, self.max_run_len > 0);
        verify_arg!(max_sequence_len, self.max_sequence_len > 0);
        Ok(())
    }
}
