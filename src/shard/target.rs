//! Physical target naming: `<prefix><zero-padded suffix>`, e.g. `ds_0`, `t_order_07`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PADDING_CHAR: char = '0';

/// Naming convention shared by all data nodes of one logic table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataNodeInfo {
    pub prefix: String,
    pub suffix_min_length: usize,
    pub padding_char: char,
}

impl DataNodeInfo {
    pub fn new(prefix: impl Into<String>, suffix_min_length: usize, padding_char: char) -> Self {
        Self {
            prefix: prefix.into(),
            suffix_min_length,
            padding_char,
        }
    }

    /// Derive the convention from one concrete node name.
    ///
    /// Trailing ASCII digits are the suffix; `t_order_01` gives prefix
    /// `t_order_` with a minimum suffix length of 2.
    pub fn infer(data_node: &str) -> Self {
        let prefix = data_node.trim_end_matches(|c: char| c.is_ascii_digit());
        Self::new(
            prefix,
            data_node.len() - prefix.len(),
            DEFAULT_PADDING_CHAR,
        )
    }

    /// Full target name for a numeric suffix.
    pub fn target_name(&self, suffix: &str) -> String {
        let pad = self.suffix_min_length.saturating_sub(suffix.chars().count());
        let mut name = String::with_capacity(self.prefix.len() + pad + suffix.len());
        name.push_str(&self.prefix);
        name.extend(std::iter::repeat(self.padding_char).take(pad));
        name.push_str(suffix);
        name
    }
}

/// Find the available target carrying `suffix` under `info`'s convention.
pub fn find_matched_target_name<S: AsRef<str>>(
    available_target_names: &[S],
    suffix: &str,
    info: &DataNodeInfo,
) -> Option<String> {
    let expected = info.target_name(suffix);
    available_target_names
        .iter()
        .find(|name| name.as_ref() == expected)
        .map(|name| name.as_ref().to_string())
}
