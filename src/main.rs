//! dnsimple-ddns - keeps a DNSimple A record on the current public IP.

use clap::Parser;
use dnsimple_ddns::config::{parse_interval, Config, Overrides};
use dnsimple_ddns::{DnsimpleDirectory, IpResolver, Reconciler, TokioSleeper};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "dnsimple-ddns")]
#[command(about = "Keeps a DNSimple A record pointed at your current public IP")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, env = "DDNS_CONFIG")]
    config: Option<PathBuf>,

    /// Time between updates (e.g. 300, 90s, 5m) [default: 5m]
    #[arg(short, long, env = "DDNS_FREQUENCY", value_parser = parse_interval)]
    frequency: Option<Duration>,

    /// DNSimple API endpoint [default: api.dnsimple.com]
    #[arg(short, long, env = "DDNS_SERVER")]
    server: Option<String>,

    /// Value for X-DNSimple-Domain-Token header
    #[arg(short, long, env = "DDNS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Domain the entry is for
    #[arg(short, long, env = "DDNS_DOMAIN")]
    domain: Option<String>,

    /// Name of the entry
    #[arg(short, long, env = "DDNS_NAME")]
    name: Option<String>,

    /// TTL of the managed record in seconds [default: 5]
    #[arg(long, env = "DDNS_TTL")]
    ttl: Option<u32>,

    /// IP echo service answering {"ip": "..."} [default: http://jsonip.com]
    #[arg(long, env = "DDNS_IP_SERVICE")]
    ip_service: Option<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            update_interval: self.frequency,
            api_host: self.server.clone(),
            ip_service: self.ip_service.clone(),
            domain_token: self.token.clone(),
            domain: self.domain.clone(),
            entry_name: self.name.clone(),
            ttl: self.ttl,
        }
    }
}

fn get_config_path(cli_path: Option<PathBuf>) -> Option<PathBuf> {
    if cli_path.is_some() {
        return cli_path;
    }

    let candidates = [
        Config::default_path().ok(),
        Some(PathBuf::from("/etc/dnsimple-ddns/config.toml")),
        Some(PathBuf::from("config.toml")),
    ];

    candidates
        .into_iter()
        .flatten()
        .find(|candidate| candidate.exists())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = match get_config_path(cli.config.clone()) {
        Some(path) => {
            tracing::debug!("Loading configuration from {}", path.display());
            Config::load_from(&path)?
        }
        None => Config::default(),
    };
    let config = config.merge(cli.overrides());
    config.validate()?;

    tracing::info!(
        "Keeping {} up to date every {}s",
        config.fqdn(),
        config.update_interval_secs
    );

    let reconciler = Reconciler::new(
        &config,
        IpResolver::new(config.ip_service.clone()),
        DnsimpleDirectory::new(&config),
    );
    reconciler.run(&TokioSleeper).await;

    Ok(())
}
