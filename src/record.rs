//! DNSimple record model.

use serde::{Deserialize, Serialize};

/// Record type managed by this tool.
pub const A_RECORD: &str = "A";

/// A DNS record as exchanged with the DNSimple v1 API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<u64>,
    pub content: String,
    pub record_type: String,
}

/// Wire envelope: every record travels as `{"record": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEnvelope {
    pub record: Record,
}

impl Record {
    /// A fresh A record that has not been created yet.
    pub fn new_a(name: &str, ip: &str, ttl: u32) -> Self {
        Self {
            name: name.to_string(),
            ttl: Some(ttl),
            content: ip.to_string(),
            record_type: A_RECORD.to_string(),
            ..Self::default()
        }
    }

    /// Point this record at `ip` with the given TTL.
    pub fn retarget(mut self, ip: &str, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self.content = ip.to_string();
        self
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn is_a(&self) -> bool {
        self.record_type == A_RECORD
    }
}

impl From<Record> for RecordEnvelope {
    fn from(record: Record) -> Self {
        Self { record }
    }
}

/// Keep the records for which every predicate holds, preserving order.
pub fn filter<'a>(
    records: &'a [Record],
    predicates: &[&dyn Fn(&Record) -> bool],
) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| predicates.iter().all(|p| p(*record)))
        .collect()
}

/// A records named `entry`.
pub fn matching<'a>(records: &'a [Record], entry: &str) -> Vec<&'a Record> {
    let named = |r: &Record| r.is_named(entry);
    let predicates: [&dyn Fn(&Record) -> bool; 2] = [&named, &Record::is_a];
    filter(records, &predicates)
}
