//! The poll/compare/act loop keeping the entry's A record current.

use crate::config::Config;
use crate::directory::RecordDirectory;
use crate::record;
use crate::resolver::IpSource;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

/// Suspends the loop between ticks.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// What a single tick decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No matching record existed and one was created.
    Created,
    /// The single matching record was updated.
    Updated { id: Option<u64> },
    /// Several records match the entry; nothing was touched.
    Ambiguous { matches: usize },
    ResolveFailed,
    ListFailed,
    CreateFailed,
    UpdateFailed,
}

/// Drives the IP source and the record directory.
pub struct Reconciler<I, D> {
    ip_source: I,
    directory: D,
    entry_name: String,
    domain: String,
    interval: Duration,
}

impl<I: IpSource, D: RecordDirectory> Reconciler<I, D> {
    pub fn new(config: &Config, ip_source: I, directory: D) -> Self {
        Self {
            ip_source,
            directory,
            entry_name: config.entry_name.clone(),
            domain: config.domain.clone(),
            interval: config.update_interval(),
        }
    }

    /// Run one resolve/list/create-or-update cycle.
    pub async fn tick(&self) -> TickOutcome {
        let ip = match self.ip_source.resolve().await {
            Ok(ip) => ip,
            Err(e) => {
                warn!("Could not obtain external IP: {}", e);
                return TickOutcome::ResolveFailed;
            }
        };
        info!("External IP: {}", ip);

        let records = match self.directory.list().await {
            Ok(records) => records,
            Err(e) => {
                warn!("Could not list records: {}", e);
                return TickOutcome::ListFailed;
            }
        };

        let matches = record::matching(&records, &self.entry_name);
        match matches.as_slice() {
            [] => {
                info!(
                    "Creating new A record {}.{}",
                    self.entry_name, self.domain
                );
                match self.directory.create(&self.entry_name, &ip).await {
                    Ok(()) => TickOutcome::Created,
                    Err(e) => {
                        warn!("Could not create record: {}", e);
                        TickOutcome::CreateFailed
                    }
                }
            }
            [existing] => {
                info!(
                    "Updating existing A record {}.{}",
                    self.entry_name, self.domain
                );
                match self.directory.update(existing, &ip).await {
                    Ok(()) => TickOutcome::Updated { id: existing.id },
                    Err(e) => {
                        warn!("Could not update record: {}", e);
                        TickOutcome::UpdateFailed
                    }
                }
            }
            several => {
                warn!(
                    "{} A records match {}.{}, skipping",
                    several.len(),
                    self.entry_name,
                    self.domain
                );
                TickOutcome::Ambiguous {
                    matches: several.len(),
                }
            }
        }
    }

    /// Loop forever; the first tick runs immediately.
    pub async fn run<S: Sleeper>(&self, sleeper: &S) {
        let mut first = true;
        loop {
            self.scheduled_tick(sleeper, first).await;
            first = false;
        }
    }

    /// Run `ticks` iterations of the loop with the same schedule as [`run`](Self::run).
    pub async fn run_ticks<S: Sleeper>(&self, sleeper: &S, ticks: usize) -> Vec<TickOutcome> {
        let mut outcomes = Vec::with_capacity(ticks);
        for n in 0..ticks {
            outcomes.push(self.scheduled_tick(sleeper, n == 0).await);
        }
        outcomes
    }

    async fn scheduled_tick<S: Sleeper>(&self, sleeper: &S, first: bool) -> TickOutcome {
        if !first {
            sleeper.sleep(self.interval).await;
        }
        self.tick().await
    }
}
