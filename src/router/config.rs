//! Router tuning knobs.

use crate::error::{Result, RouterError};
use crate::math::NewtonConfig;

/// How aggressively the split optimizer retires weak candidate routes
/// between allocation slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PruningPolicy {
    /// Halve the distance to the candidate floor each slice. Converges
    /// quickly on a small working set while still giving every route a
    /// few slices to prove itself.
    Quadratic,
    /// Drop a fixed number of the weakest candidates each slice.
    Linear {
        /// Candidates retired per slice; zero disables pruning.
        step: usize,
    },
}

impl Default for PruningPolicy {
    fn default() -> Self {
        Self::Quadratic
    }
}

/// Configuration for route discovery, splitting, and finalization.
///
/// The defaults trade quote quality against latency the way an exchange
/// front end wants: short routes, a couple of dozen candidates kept
/// alive, and a hard ceiling on total hops per aggregate trade.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouterConfig {
    /// Maximum pools a single route may traverse.
    pub max_route_length: usize,
    /// Number of equal slices the trade amount is divided into during
    /// split optimization.
    pub trade_partition_count: u32,
    /// Pruning never cuts the live candidate set below this floor.
    pub min_routes_to_check: usize,
    /// Upper bound on the summed hop count across every route in the
    /// final aggregate.
    pub max_pool_hops_for_complete_route: usize,
    /// Candidate retirement schedule.
    pub pruning: PruningPolicy,
    /// Balance solver tuning.
    pub newton: NewtonConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_route_length: 3,
            trade_partition_count: 50,
            min_routes_to_check: 25,
            max_pool_hops_for_complete_route: 9,
            pruning: PruningPolicy::Quadratic,
            newton: NewtonConfig::default(),
        }
    }
}

impl RouterConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfiguration`] when any count that
    /// must be positive is zero, or when the nested solver configuration
    /// is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.max_route_length == 0 {
            return Err(RouterError::InvalidConfiguration(
                "max_route_length must be positive",
            ));
        }
        if self.trade_partition_count == 0 {
            return Err(RouterError::InvalidConfiguration(
                "trade_partition_count must be positive",
            ));
        }
        if self.min_routes_to_check == 0 {
            return Err(RouterError::InvalidConfiguration(
                "min_routes_to_check must be positive",
            ));
        }
        if self.max_pool_hops_for_complete_route < self.max_route_length {
            return Err(RouterError::InvalidConfiguration(
                "max_pool_hops_for_complete_route must cover at least one full route",
            ));
        }
        self.newton.validate()
    }
}
