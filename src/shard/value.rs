use crate::shard::target::DataNodeInfo;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::ops::Bound;
use uuid::Uuid;

/// A sharding key value.
///
/// Routing hashes [`ShardingValue::canonical_bytes`], never Rust's `Hash`, so
/// the same logical key lands on the same node from any process.
///
/// `Int(n)` and `UInt(n)` share canonical bytes for `n >= 0` and so route
/// identically, but compare and order as different values (every `Int`
/// sorts before every `UInt`). The `From` conversions keep this from
/// surfacing: unsigned integers that fit in `i64` become `Int`, so `UInt`
/// only ever holds values above `i64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShardingValue {
    Int(i64),
    UInt(u64),
    Str(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
}

impl ShardingValue {
    /// Hash input:
    /// - `Int`/`UInt`: 8 bytes little-endian
    /// - `Str`: UTF-8
    /// - `Bytes`: verbatim
    /// - `Uuid`: the 16 RFC 4122 bytes
    pub fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            ShardingValue::Int(v) => Cow::Owned(v.to_le_bytes().to_vec()),
            ShardingValue::UInt(v) => Cow::Owned(v.to_le_bytes().to_vec()),
            ShardingValue::Str(s) => Cow::Borrowed(s.as_bytes()),
            ShardingValue::Bytes(b) => Cow::Borrowed(b.as_slice()),
            ShardingValue::Uuid(u) => Cow::Borrowed(u.as_bytes().as_slice()),
        }
    }
}

impl fmt::Display for ShardingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShardingValue::Int(v) => write!(f, "{}", v),
            ShardingValue::UInt(v) => write!(f, "{}", v),
            ShardingValue::Str(s) => write!(f, "{}", s),
            ShardingValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            ShardingValue::Uuid(u) => write!(f, "{}", u),
        }
    }
}

impl From<i32> for ShardingValue {
    fn from(v: i32) -> Self {
        ShardingValue::Int(i64::from(v))
    }
}

impl From<i64> for ShardingValue {
    fn from(v: i64) -> Self {
        ShardingValue::Int(v)
    }
}

impl From<u32> for ShardingValue {
    fn from(v: u32) -> Self {
        ShardingValue::Int(i64::from(v))
    }
}

impl From<u64> for ShardingValue {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(signed) => ShardingValue::Int(signed),
            Err(_) => ShardingValue::UInt(v),
        }
    }
}

impl From<&str> for ShardingValue {
    fn from(v: &str) -> Self {
        ShardingValue::Str(v.to_string())
    }
}

impl From<String> for ShardingValue {
    fn from(v: String) -> Self {
        ShardingValue::Str(v)
    }
}

impl From<&[u8]> for ShardingValue {
    fn from(v: &[u8]) -> Self {
        ShardingValue::Bytes(v.to_vec())
    }
}

impl From<Vec<u8>> for ShardingValue {
    fn from(v: Vec<u8>) -> Self {
        ShardingValue::Bytes(v)
    }
}

impl From<Uuid> for ShardingValue {
    fn from(v: Uuid) -> Self {
        ShardingValue::Uuid(v)
    }
}

/// Sharding input for an equality condition (`WHERE col = ?`).
///
/// `value` is `None` when the query bound a null key.
#[derive(Debug, Clone)]
pub struct PreciseShardingValue {
    pub logic_table_name: String,
    pub column_name: String,
    pub data_node_info: DataNodeInfo,
    pub value: Option<ShardingValue>,
}

impl PreciseShardingValue {
    pub fn new(
        logic_table_name: impl Into<String>,
        column_name: impl Into<String>,
        data_node_info: DataNodeInfo,
        value: impl Into<ShardingValue>,
    ) -> Self {
        Self {
            logic_table_name: logic_table_name.into(),
            column_name: column_name.into(),
            data_node_info,
            value: Some(value.into()),
        }
    }

    pub fn null(
        logic_table_name: impl Into<String>,
        column_name: impl Into<String>,
        data_node_info: DataNodeInfo,
    ) -> Self {
        Self {
            logic_table_name: logic_table_name.into(),
            column_name: column_name.into(),
            data_node_info,
            value: None,
        }
    }
}

/// Sharding input for a range condition (`BETWEEN`, `<`, `>=`, ...)
#[derive(Debug, Clone)]
pub struct RangeShardingValue {
    pub logic_table_name: String,
    pub column_name: String,
    pub data_node_info: DataNodeInfo,
    pub lower: Bound<ShardingValue>,
    pub upper: Bound<ShardingValue>,
}

impl RangeShardingValue {
    pub fn new(
        logic_table_name: impl Into<String>,
        column_name: impl Into<String>,
        data_node_info: DataNodeInfo,
        lower: Bound<ShardingValue>,
        upper: Bound<ShardingValue>,
    ) -> Self {
        Self {
            logic_table_name: logic_table_name.into(),
            column_name: column_name.into(),
            data_node_info,
            lower,
            upper,
        }
    }

    /// Unbounded on both sides.
    pub fn all(
        logic_table_name: impl Into<String>,
        column_name: impl Into<String>,
        data_node_info: DataNodeInfo,
    ) -> Self {
        Self::new(
            logic_table_name,
            column_name,
            data_node_info,
            Bound::Unbounded,
            Bound::Unbounded,
        )
    }
}
