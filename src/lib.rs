//! # dnsimple-ddns
//!
//! Keeps a DNSimple A record pointed at the machine's current public IP.
//!
//! Every tick the public IP is read from a JSON echo service, the domain's
//! records are listed, and the A record for the configured entry is created
//! when missing or updated when present. Ticks that fail are logged and the
//! loop carries on at the next interval.
//!
//! ## Usage
//!
//! ```bash
//! dnsimple-ddns -t "$DOMAIN_TOKEN" -d example.com -n home -f 5m
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod reconciler;
pub mod record;
pub mod resolver;

pub use config::Config;
pub use directory::{DnsimpleDirectory, RecordDirectory};
pub use error::{DdnsError, Result};
pub use reconciler::{Reconciler, TickOutcome, TokioSleeper};
pub use record::Record;
pub use resolver::{IpResolver, IpSource};
