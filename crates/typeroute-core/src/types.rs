//! Routing table types
//!
//! A routing table maps a type key to the family of methods discovered for it.
//! Each family remembers the name fragment before the route marker and the
//! type suffixes seen after it.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RouteError;

/// Default separator between a method's base name and its type suffix
pub const DEFAULT_ROUTE_MARKER: &str = "_";

/// One discovered routable method family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Method name fragment before the route marker
    pub base_name: String,

    /// Type suffixes in discovery order, without duplicates
    pub type_suffixes: Vec<String>,
}

impl RouteEntry {
    /// Create an entry with no suffixes yet
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            type_suffixes: Vec::new(),
        }
    }

    /// Whether `value` was recorded as a suffix of this family
    pub fn contains_suffix(&self, value: &str) -> bool {
        self.type_suffixes.iter().any(|s| s == value)
    }
}

/// Mapping from type key to its method family
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutingTable {
    entries: BTreeMap<String, RouteEntry>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a discovered method under `tag`.
    ///
    /// Creates the entry on first sight, overwrites its base name, and appends
    /// `tag` to the suffixes unless already present. Returns true when the
    /// suffix list grew.
    pub fn record(&mut self, tag: &str, base_name: &str) -> bool {
        let entry = self
            .entries
            .entry(tag.to_string())
            .or_insert_with(|| RouteEntry::new(base_name));

        if entry.base_name != base_name {
            entry.base_name = base_name.to_string();
        }

        if entry.contains_suffix(tag) {
            return false;
        }
        entry.type_suffixes.push(tag.to_string());
        true
    }

    pub fn get(&self, key: &str) -> Option<&RouteEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// How a scan treats entries left over from earlier scans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Reset the table before every scan
    #[default]
    Replace,
    /// Merge discoveries into the existing table
    Accumulate,
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanMode::Replace => write!(f, "replace"),
            ScanMode::Accumulate => write!(f, "accumulate"),
        }
    }
}

impl FromStr for ScanMode {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(ScanMode::Replace),
            "accumulate" => Ok(ScanMode::Accumulate),
            other => Err(RouteError::InvalidConfig(format!("unknown scan mode: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creates_entry() {
        let mut table = RoutingTable::new();
        assert!(table.record("NSString", "foo"));

        let entry = table.get("NSString").unwrap();
        assert_eq!(entry.base_name, "foo");
        assert_eq!(entry.type_suffixes, vec!["NSString".to_string()]);
    }

    #[test]
    fn test_record_is_idempotent() {
        let mut table = RoutingTable::new();
        table.record("NSString", "foo");
        assert!(!table.record("NSString", "foo"));
        assert_eq!(table.get("NSString").unwrap().type_suffixes.len(), 1);
    }

    #[test]
    fn test_record_overwrites_base_name() {
        let mut table = RoutingTable::new();
        table.record("NSString", "foo");
        table.record("NSString", "bar");

        let entry = table.get("NSString").unwrap();
        assert_eq!(entry.base_name, "bar");
        assert_eq!(entry.type_suffixes, vec!["NSString".to_string()]);
    }

    #[test]
    fn test_contains_suffix() {
        let mut entry = RouteEntry::new("handle");
        entry.type_suffixes.push("NSString".into());

        assert!(entry.contains_suffix("NSString"));
        assert!(!entry.contains_suffix("NSNumber"));
    }

    #[test]
    fn test_table_serializes_as_map() {
        let mut table = RoutingTable::new();
        table.record("NSNumber", "foo");

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "NSNumber": { "base_name": "foo", "type_suffixes": ["NSNumber"] }
            })
        );
    }

    #[test]
    fn test_scan_mode_parse() {
        assert_eq!("replace".parse::<ScanMode>().unwrap(), ScanMode::Replace);
        assert_eq!(" Accumulate ".parse::<ScanMode>().unwrap(), ScanMode::Accumulate);
        assert!(matches!(
            "merge".parse::<ScanMode>(),
            Err(RouteError::InvalidConfig(_))
        ));
    }
}
