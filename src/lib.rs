//! LumaDB Sharding Algorithms
//!
//! Deterministic routing of sharding keys onto physical data nodes:
//! - **CLASS_BASED**: two-level (database x table) hash-mod routing
//! - **HASH_MOD**: single-level hash-mod routing
//!
//! Range queries are never narrowed; every available target is returned.
//!
//! # Usage
//!
//! ```rust,ignore
//! use luma_sharding::{Properties, ShardRouter, PreciseShardingValue, DataNodeInfo};
//!
//! let props = Properties::from_pairs([("sharding-count", "16"), ("table-sharding-count", "8")]);
//! let router = ShardRouter::configure(&props)?;
//! let value = PreciseShardingValue::new("t_order", "user_id", DataNodeInfo::infer("ds_0"), 1024_i64);
//! let target = router.route_precise(&["ds_0".into(), "ds_1".into()], &value)?;
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod shard;

pub use config::{AlgorithmConfig, Properties, ShardingRuleConfig};
pub use error::{ConfigError, Result, ShardingError};
pub use shard::{
    find_matched_target_name, hash_sharding_value, stable_hash, DataNodeInfo, HashModRouter,
    PreciseShardingValue, RangeShardingValue, RoutingStrategy, ShardRouter, ShardingRule,
    ShardingValue, StrategyRegistry,
};
