pub mod hash;
pub mod hash_mod;
pub mod registry;
pub mod router;
pub mod rule;
pub mod strategy;
pub mod target;
pub mod value;

// Re-exports
pub use hash::{hash_sharding_value, stable_hash};
pub use hash_mod::HashModRouter;
pub use registry::{StrategyConstructor, StrategyRegistry};
pub use router::{ShardRouter, SHARDING_COUNT_KEY, TABLE_SHARDING_COUNT_KEY};
pub use rule::ShardingRule;
pub use strategy::RoutingStrategy;
pub use target::{find_matched_target_name, DataNodeInfo, DEFAULT_PADDING_CHAR};
pub use value::{PreciseShardingValue, RangeShardingValue, ShardingValue};
