use crate::config::Properties;
use crate::error::{Result, ShardingError};
use crate::shard::hash::hash_sharding_value;
use crate::shard::router::SHARDING_COUNT_KEY;
use crate::shard::strategy::RoutingStrategy;
use crate::shard::target::find_matched_target_name;
use crate::shard::value::{PreciseShardingValue, RangeShardingValue, ShardingValue};
use std::num::NonZeroU32;

/// Single-level hash-mod router: `index = |hash(key)| % sharding_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashModRouter {
    sharding_count: NonZeroU32,
}

impl HashModRouter {
    pub const TYPE: &'static str = "HASH_MOD";

    pub fn new(sharding_count: NonZeroU32) -> Self {
        Self { sharding_count }
    }

    pub fn configure(props: &Properties) -> Result<Self> {
        let sharding_count = props.require_positive(Self::TYPE, SHARDING_COUNT_KEY)?;
        tracing::debug!(
            sharding_count = sharding_count.get(),
            "configured {} sharding algorithm",
            Self::TYPE
        );
        Ok(Self::new(sharding_count))
    }

    pub fn sharding_count(&self) -> u32 {
        self.sharding_count.get()
    }

    pub fn partition_index(&self, key: &ShardingValue) -> u64 {
        hash_sharding_value(key) % u64::from(self.sharding_count.get())
    }
}

impl RoutingStrategy for HashModRouter {
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
