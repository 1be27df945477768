//! Integration tests for hash-mod sharding
//!
//! Tests configuration, precise/range routing, the strategy registry and rule files.

use luma_sharding::{
    DataNodeInfo, PreciseShardingValue, Properties, RangeShardingValue, RoutingStrategy,
    ShardRouter, ShardingRule, ShardingRuleConfig, ShardingValue, StrategyRegistry,
};
use proptest::prelude::*;
use std::io::Write;
use std::sync::Arc;
use std::thread;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn router(sharding_count: u32, table_sharding_count: u32) -> ShardRouter {
    ShardRouter::configure(&Properties::from_pairs([
        ("sharding-count", sharding_count.to_string()),
        ("table-sharding-count", table_sharding_count.to_string()),
    ]))
    .unwrap()
}

fn data_nodes(count: u64) -> Vec<String> {
    (0..count).map(|i| format!("ds_{}", i)).collect()
}

#[cfg(test)]
mod configure_tests {
    use super::*;

    #[test]
    fn test_empty_props_mention_sharding_count() {
        init_tracing();
        let err = ShardRouter::configure(&Properties::new()).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("sharding-count"));
    }

    #[test]
    fn test_missing_table_sharding_count() {
        let props = Properties::from_pairs([("sharding-count", "4")]);
        let err = ShardRouter::configure(&props).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("table-sharding-count"));
    }

    #[test]
    fn test_non_numeric_sharding_count() {
        let props = Properties::from_pairs([
            ("sharding-count", "x"),
            ("table-sharding-count", "2"),
        ]);
        let err = ShardRouter::configure(&props).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unrecognized_keys_ignored() {
        let props = Properties::from_pairs([
            ("sharding-count", "4"),
            ("table-sharding-count", "2"),
            ("max-connections", "not-a-number"),
        ]);
        assert!(ShardRouter::configure(&props).is_ok());
    }
}

#[cfg(test)]
mod router_tests {
    use super::*;

    #[test]
    fn test_router_deterministic() {
        let router = router(16, 4);
        let names = data_nodes(4);
        let value = PreciseShardingValue::new("t_order", "order_id", DataNodeInfo::infer("ds_0"), "test_key");

        let first = router.route_precise(&names, &value).unwrap();
        let second = router.route_precise(&names, &value).unwrap();

        assert!(first.is_some());
        assert_eq!(first, second, "Same key should always route to same target");
    }

    #[test]
    fn test_router_independent_instances_agree() {
        let a = router(32, 8);
        let b = router(32, 8);
        for i in 0..1_000_u64 {
            let key = ShardingValue::from(i);
            assert_eq!(a.partition_index(&key), b.partition_index(&key));
        }
    }

    #[test]
    fn test_router_distribution() {
        let router = router(16, 1);
        let mut counts = vec![0usize; 16];

        for i in 0..10_000 {
            let key = ShardingValue::from(format!("key_{}", i));
            counts[router.partition_index(&key) as usize] += 1;
        }

        for (index, count) in counts.iter().enumerate() {
            assert!(*count > 0, "Partition {} has no keys", index);
        }
    }

    #[test]
    fn test_two_level_split_covers_all_nodes() {
        let router = router(16, 8);
        let names = data_nodes(2);
        let info = DataNodeInfo::infer("ds_0");
        let mut seen = std::collections::BTreeSet::new();

        for i in 0..1_000_i64 {
            let value = PreciseShardingValue::new("t_order", "user_id", info.clone(), i);
            seen.insert(router.route_precise(&names, &value).unwrap().unwrap());
        }

        assert_eq!(seen.into_iter().collect::<Vec<_>>(), names);
    }

    #[test]
    fn test_mid_migration_missing_node_is_none() {
        let router = router(4, 1);
        let names = vec!["ds_0".to_string()];
        let info = DataNodeInfo::infer("ds_0");

        let mut misses = 0;
        for i in 0..100_i64 {
            let value = PreciseShardingValue::new("t_order", "user_id", info.clone(), i);
            match router.route_precise(&names, &value).unwrap() {
                Some(name) => assert_eq!(name, "ds_0"),
                None => misses += 1,
            }
        }
        assert!(misses > 0);
    }

    #[test]
    fn test_null_key_rejected() {
        let router = router(4, 2);
        let value = PreciseShardingValue::null("t_order", "user_id", DataNodeInfo::infer("ds_0"));
        let err = router.route_precise(&data_nodes(2), &value).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_route_range_all_targets() {
        let router = router(4, 2);
        let range = RangeShardingValue::all("t_order", "user_id", DataNodeInfo::infer("ds_0"));

        assert_eq!(router.route_range(&data_nodes(2), &range), data_nodes(2));
        assert!(router.route_range(&[], &range).is_empty());
    }

    #[test]
    fn test_concurrent_routing() {
        let router: Arc<dyn RoutingStrategy> = Arc::new(router(64, 8));
        let names = Arc::new(data_nodes(8));
        let info = DataNodeInfo::infer("ds_0");

        let expected: Vec<Option<String>> = (0..256_i64)
            .map(|i| {
                let value = PreciseShardingValue::new("t_order", "user_id", info.clone(), i);
                router.route_precise(&names, &value).unwrap()
            })
            .collect();
        let expected = Arc::new(expected);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let router = Arc::clone(&router);
                let names = Arc::clone(&names);
                let expected = Arc::clone(&expected);
                let info = info.clone();
                thread::spawn(move || {
                    for i in 0..256_i64 {
                        let value = PreciseShardingValue::new("t_order", "user_id", info.clone(), i);
                        let got = router.route_precise(&names, &value).unwrap();
                        assert_eq!(got, expected[i as usize]);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}

#[cfg(test)]
mod rule_tests {
    use super::*;

    #[test]
    fn test_load_toml_rule_file() {
        init_tracing();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
logic-table = "t_order"
sharding-column = "user_id"
actual-data-nodes = ["t_order_00", "t_order_01", "t_order_02", "t_order_03"]

[algorithm]
type = "CLASS_BASED"

[algorithm.props]
sharding-count = 16
table-sharding-count = 4
"#
        )
        .unwrap();

        let rule = ShardingRule::load(file.path()).unwrap();
        assert_eq!(rule.strategy().type_name(), "CLASS_BASED");
        assert_eq!(rule.data_node_info(), &DataNodeInfo::new("t_order_", 2, '0'));

        let target = rule.route(Some(ShardingValue::from(7_i64))).unwrap().unwrap();
        assert!(rule.data_nodes().contains(&target));
    }

    #[test]
    fn test_load_yaml_rule_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            r#"
logic-table: t_user
sharding-column: id
actual-data-nodes: [ds_0, ds_1, ds_2]
algorithm:
  type: hash_mod
  props:
    sharding-count: "3"
"#
        )
        .unwrap();

        let rule = ShardingRule::load(file.path()).unwrap();
        assert_eq!(rule.strategy().type_name(), "HASH_MOD");
        assert!(rule.route(Some(ShardingValue::from("alice"))).unwrap().is_some());
    }

    #[test]
    fn test_rule_with_bad_props_fails_fast() {
        let config = ShardingRuleConfig::from_toml_str(
            r#"
logic-table = "t_order"
sharding-column = "user_id"
actual-data-nodes = ["ds_0"]

[algorithm]
type = "CLASS_BASED"

[algorithm.props]
sharding-count = 16
"#,
        )
        .unwrap();

        let err = ShardingRule::new(config, StrategyRegistry::global()).unwrap_err();
        assert_eq!(err.property_key(), Some("table-sharding-count"));
    }

    #[test]
    fn test_unsupported_rule_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(ShardingRule::load(file.path()).unwrap_err().is_configuration());
    }

    #[test]
    fn test_missing_rule_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShardingRule::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(err.is_configuration());
    }
}

proptest! {
    #[test]
    fn prop_partition_index_in_range(
        key in any::<i64>(),
        sharding_count in 1_u32..1_024,
        table_sharding_count in 1_u32..64,
    ) {
        let router = router(sharding_count, table_sharding_count);
        let index = router.partition_index(&ShardingValue::from(key));
        prop_assert!(index < u64::from(router.partition_count()));
    }

    #[test]
    fn prop_routing_is_deterministic(key in ".*", sharding_count in 1_u32..256) {
        let a = router(sharding_count, 1);
        let b = router(sharding_count, 1);
        let key = ShardingValue::from(key);
        prop_assert_eq!(a.partition_index(&key), b.partition_index(&key));
    }

    #[test]
    fn prop_range_returns_input(names in proptest::collection::vec("[a-z]{1,8}_[0-9]{1,2}", 0..16)) {
        let router = router(8, 2);
        let range = RangeShardingValue::all("t", "c", DataNodeInfo::infer("ds_0"));
        prop_assert_eq!(router.route_range(&names, &range), names);
    }
}
