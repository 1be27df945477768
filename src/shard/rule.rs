use crate::config::ShardingRuleConfig;
use crate::error::{ConfigError, Result, ShardingError};
use crate::shard::registry::StrategyRegistry;
use crate::shard::strategy::RoutingStrategy;
use crate::shard::target::DataNodeInfo;
use crate::shard::value::{PreciseShardingValue, RangeShardingValue, ShardingValue};
use std::ops::Bound;
use std::path::Path;

/// A configured strategy bound to one logic table and its data nodes
#[derive(Debug)]
pub struct ShardingRule {
    logic_table: String,
    sharding_column: String,
    data_nodes: Vec<String>,
    data_node_info: DataNodeInfo,
    strategy: Box<dyn RoutingStrategy>,
}

impl ShardingRule {
    pub fn new(config: ShardingRuleConfig, registry: &StrategyRegistry) -> Result<Self> {
        let algorithm = config.algorithm.algorithm_type.as_str();
        let first = config.actual_data_nodes.first().ok_or_else(|| {
            ShardingError::configuration(
                algorithm,
                ConfigError::InvalidRule(format!(
                    "logic table `{}` has no actual data nodes",
                    config.logic_table
                )),
            )
        })?;
        let data_node_info = DataNodeInfo::infer(first);

        let strategy = registry.create(algorithm, &config.algorithm.props)?;
        tracing::info!(
            logic_table = %config.logic_table,
            algorithm = strategy.type_name(),
            data_nodes = config.actual_data_nodes.len(),
            "sharding rule ready"
        );

        Ok(Self {
            logic_table: config.logic_table,
            sharding_column: config.sharding_column,
            data_nodes: config.actual_data_nodes,
            data_node_info,
            strategy,
        })
    }

    /// Load a rule file and build it against the global registry.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(ShardingRuleConfig::load(path)?, StrategyRegistry::global())
    }

    pub fn logic_table(&self) -> &str {
        &self.logic_table
    }

    pub fn sharding_column(&self) -> &str {
        &self.sharding_column
    }

    pub fn data_nodes(&self) -> &[String] {
        &self.data_nodes
    }

    pub fn data_node_info(&self) -> &DataNodeInfo {
        &self.data_node_info
    }

    pub fn strategy(&self) -> &dyn RoutingStrategy {
        self.strategy.as_ref()
    }

    /// Data node owning `key`; `None` key is rejected.
    pub fn route(&self, key: Option<ShardingValue>) -> Result<Option<String>> {
        let value = PreciseShardingValue {
            logic_table_name: self.logic_table.clone(),
            column_name: self.sharding_column.clone(),
            data_node_info: self.data_node_info.clone(),
            value: key,
        };
        self.strategy.route_precise(&self.data_nodes, &value)
    }

    pub fn route_range(
        &self,
        lower: Bound<ShardingValue>,
        upper: Bound<ShardingValue>,
    ) -> Vec<String> {
        let value = RangeShardingValue::new(
            self.logic_table.clone(),
            self.sharding_column.clone(),
            self.data_node_info.clone(),
            lower,
            upper,
        );
        self.strategy.route_range(&self.data_nodes, &value)
    }
}
