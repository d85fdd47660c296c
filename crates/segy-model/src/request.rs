//! Grid override request parameterization.

use serde::{Deserialize, Serialize};

/// A single request entry: either an override flag or a numeric parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideValue {
    Flag(bool),
    Int(i64),
}

/// Caller-supplied grid override selection.
///
/// Entries keep their insertion order, which is the order the engine
/// applies overrides in. An entry is either an override name (resolved to
/// a command) or a parameter consumed by one of the commands, e.g.
/// `ChannelsPerCable` or `chunksize`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridOverrideRequest {
    entries: Vec<(String, OverrideValue)>,
}

impl GridOverrideRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an override by name.
    pub fn with_flag(mut self, name: impl Into<String>) -> Self {
        self.entries.push((name.into(), OverrideValue::Flag(true)));
        self
    }

    /// Supply a numeric parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, value: i64) -> Self {
        self.entries.push((name.into(), OverrideValue::Int(value)));
        self
    }

    /// Whether an entry with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Numeric value of a parameter entry, if present and numeric.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.entries.iter().find_map(|(n, value)| match value {
            OverrideValue::Int(v) if n == name => Some(*v),
            _ => None,
        })
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, OverrideValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_request_order() {
        let request = GridOverrideRequest::new()
            .with_flag("ChannelWrap")
            .with_parameter("ChannelsPerCable", 800);

        let names: Vec<&str> = request.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["ChannelWrap", "ChannelsPerCable"]);
    }

    #[test]
    fn integer_ignores_flag_entries() {
        let request = GridOverrideRequest::new()
            .with_flag("NonBinned")
            .with_parameter("chunksize", 64);

        assert_eq!(request.integer("chunksize"), Some(64));
        assert_eq!(request.integer("NonBinned"), None);
        assert!(request.contains("NonBinned"));
    }

    #[test]
    fn request_round_trips_through_json() {
        let request = GridOverrideRequest::new()
            .with_flag("AutoChannelWrap")
            .with_parameter("ChannelsPerCable", 240);

        let json = serde_json::to_string(&request).expect("serialize request");
        let round: GridOverrideRequest = serde_json::from_str(&json).expect("deserialize request");
        assert_eq!(round, request);
    }
}
