use crate::config::Properties;
use crate::error::{Result, ShardingError};
use crate::shard::hash::hash_sharding_value;
use crate::shard::strategy::RoutingStrategy;
use crate::shard::target::find_matched_target_name;
use crate::shard::value::{PreciseShardingValue, RangeShardingValue, ShardingValue};
use std::num::NonZeroU32;

pub const SHARDING_COUNT_KEY: &str = "sharding-count";
pub const TABLE_SHARDING_COUNT_KEY: &str = "table-sharding-count";

/// Database x table hash-mod router.
///
/// A key hashes into one of `sharding_count` slots; every run of
/// `table_sharding_count` consecutive slots belongs to one data node:
///
/// ```text
/// index = (|hash(key)| % sharding_count) / table_sharding_count
/// ```
///
/// Range queries cannot be narrowed by a hash, so they hit every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardRouter {
    sharding_count: NonZeroU32,
    table_sharding_count: NonZeroU32,
}

impl ShardRouter {
    pub const TYPE: &'static str = "CLASS_BASED";

    pub fn new(sharding_count: NonZeroU32, table_sharding_count: NonZeroU32) -> Self {
        Self {
            sharding_count,
            table_sharding_count,
        }
    }

    /// Build a router from `sharding-count` and `table-sharding-count`.
    ///
    /// Both are mandatory positive integers.
    pub fn configure(props: &Properties) -> Result<Self> {
        let sharding_count = props.require_positive(Self::TYPE, SHARDING_COUNT_KEY)?;
        let table_sharding_count = props.require_positive(Self::TYPE, TABLE_SHARDING_COUNT_KEY)?;

        if sharding_count.get() % table_sharding_count.get() != 0 {
            tracing::warn!(
                sharding_count = sharding_count.get(),
                table_sharding_count = table_sharding_count.get(),
                "table-sharding-count does not divide sharding-count; last node gets fewer slots"
            );
        }
        tracing::debug!(
            sharding_count = sharding_count.get(),
            table_sharding_count = table_sharding_count.get(),
            "configured {} sharding algorithm",
            Self::TYPE
        );

        Ok(Self::new(sharding_count, table_sharding_count))
    }

    pub fn sharding_count(&self) -> u32 {
        self.sharding_count.get()
    }

    pub fn table_sharding_count(&self) -> u32 {
        self.table_sharding_count.get()
    }

    /// Number of distinct indexes the router can produce: `ceil(S / T)`.
    pub fn partition_count(&self) -> u32 {
        let s = self.sharding_count.get();
        let t = self.table_sharding_count.get();
        s / t + u32::from(s % t != 0)
    }

    /// Map an already-absolute hash to a data node index.
    pub fn partition_index_for_hash(&self, hash: u64) -> u64 {
        hash % u64::from(self.sharding_count.get()) / u64::from(self.table_sharding_count.get())
    }

    /// Data node index owning `key`.
    pub fn partition_index(&self, key: &ShardingValue) -> u64 {
        self.partition_index_for_hash(hash_sharding_value(key))
    }
}

impl RoutingStrategy for ShardRouter {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn route_precise(
        &self,
        available_target_names: &[String],
        value: &PreciseShardingValue,
    ) -> Result<Option<String>> {
        let key = value.value.as_ref().ok_or_else(|| {
            ShardingError::InvalidArgument(format!(
                "sharding value for {}.{} cannot be null",
                value.logic_table_name, value.column_name
            ))
        })?;

        let suffix = self.partition_index(key).to_string();
        let target = find_matched_target_name(available_target_names, &suffix, &value.data_node_info);
        if target.is_none() {
            tracing::trace!(
                logic_table = %value.logic_table_name,
                suffix = %suffix,
                candidates = available_target_names.len(),
                "no available target matches sharding suffix"
            );
        }
        Ok(target)
    }

    fn route_range(
        &self,
        available_target_names: &[String],
        _value: &RangeShardingValue,
    ) -> Vec<String> {
        available_target_names.to_vec()
    }
}
