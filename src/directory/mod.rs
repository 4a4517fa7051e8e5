//! DNS record directories.

mod dnsimple;

pub use dnsimple::DnsimpleDirectory;

use crate::error::Result;
use crate::record::Record;
use async_trait::async_trait;

/// Lists, creates and updates the records of one domain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordDirectory: Send + Sync {
    /// Fetch every record of the domain.
    async fn list(&self) -> Result<Vec<Record>>;

    /// Create an A record `name` pointing at `ip`.
    async fn create(&self, name: &str, ip: &str) -> Result<()>;

    /// Point an existing record at `ip`.
    async fn update(&self, record: &Record, ip: &str) -> Result<()>;
}
