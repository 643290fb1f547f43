//! Record encoding.
//!
//! Pairs are folded into a sorted map, so a repeated key keeps the value
//! written last and the emitted object has its keys in ascending order.

use kvlog_ports::{KeyValues, LogError};
use serde_json::Value;
use std::collections::BTreeMap;

/// Fold pairs into a key-sorted record (last write wins).
#[must_use]
pub fn collapse_pairs(pairs: &KeyValues) -> BTreeMap<&str, &Value> {
    pairs.iter().collect()
}

/// Encode pairs as one newline-terminated JSON object.
pub fn encode_line(pairs: &KeyValues) -> Result<String, LogError> {
    let record = collapse_pairs(pairs);
    let mut line = serde_json::to_string(&record).map_err(|error| LogError::Encode {
        message: error.to_string(),
    })?;
    line.push('\n');
    Ok(line)
}
