use crate::config::Properties;
use crate::error::{ConfigError, Result, ShardingError};
use crate::shard::hash_mod::HashModRouter;
use crate::shard::router::ShardRouter;
use crate::shard::strategy::RoutingStrategy;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;

pub type StrategyConstructor = fn(&Properties) -> Result<Box<dyn RoutingStrategy>>;

static GLOBAL_REGISTRY: Lazy<StrategyRegistry> = Lazy::new(StrategyRegistry::with_builtin);

/// Type tag -> strategy constructor. Tags are matched case-insensitively.
pub struct StrategyRegistry {
    constructors: RwLock<HashMap<String, StrategyConstructor>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self {
            constructors: RwLock::new(HashMap::new()),
        }
    }

    /// Registry holding `CLASS_BASED` and `HASH_MOD`.
    pub fn with_builtin() -> Self {
        let registry = Self::new();
        registry.register(ShardRouter::TYPE, |props| {
            Ok(Box::new(ShardRouter::configure(props)?))
        });
        registry.register(HashModRouter::TYPE, |props| {
            Ok(Box::new(HashModRouter::configure(props)?))
        });
        registry
    }

    /// Process-wide registry, seeded with the built-in strategies.
    pub fn global() -> &'static StrategyRegistry {
        &GLOBAL_REGISTRY
    }

    /// Add or replace the constructor for `type_name`.
    pub fn register(&self, type_name: &str, constructor: StrategyConstructor) {
        self.constructors
            .write()
            .insert(type_name.to_ascii_uppercase(), constructor);
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors
            .read()
            .contains_key(&type_name.to_ascii_uppercase())
    }

    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Instantiate and configure the strategy registered under `type_name`.
    pub fn create(&self, type_name: &str, props: &Properties) -> Result<Box<dyn RoutingStrategy>> {
        // Copy the fn pointer out so configuration runs without the lock held.
        let constructor = self
            .constructors
            .read()
            .get(&type_name.to_ascii_uppercase())
            .copied();

        match constructor {
            Some(constructor) => constructor(props),
            None => Err(ShardingError::configuration(
                type_name,
                ConfigError::UnknownAlgorithm(type_name.to_string()),
            )),
        }
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
