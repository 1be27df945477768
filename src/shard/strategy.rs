use crate::error::Result;
use crate::shard::value::{PreciseShardingValue, RangeShardingValue};
use std::fmt;

/// A configured sharding algorithm.
///
/// Implementations are immutable once built, so one instance can serve
/// routing calls from any number of threads.
pub trait RoutingStrategy: Send + Sync + fmt::Debug {
    /// Type tag the strategy is registered under.
    fn type_name(&self) -> &'static str;

    /// Pick the one target owning `value`.
    ///
    /// `Ok(None)` means no available target carries the computed suffix.
    /// A null key is an `InvalidArgument` error.
    fn route_precise(
        &self,
        available_target_names: &[String],
        value: &PreciseShardingValue,
    ) -> Result<Option<String>>;

    /// Targets that may hold values inside the range.
    fn route_range(
        &self,
        available_target_names: &[String],
        value: &RangeShardingValue,
    ) -> Vec<String>;
}
