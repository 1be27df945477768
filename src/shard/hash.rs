use crate::shard::value::ShardingValue;
use xxhash_rust::xxh3::xxh3_64;

/// XXH3-64 (seed 0) over the value's canonical bytes.
pub fn stable_hash(value: &ShardingValue) -> u64 {
    xxh3_64(&value.canonical_bytes())
}

/// Absolute value of the hash read as a signed 64-bit integer.
///
/// `i64::MIN` maps to `2^63` rather than overflowing.
pub fn hash_sharding_value(value: &ShardingValue) -> u64 {
    (stable_hash(value) as i64).unsigned_abs()
}
