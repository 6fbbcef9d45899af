use clap::Parser;
use hostcache::{bootstrap, Resolver};
use hostcache_domain::CliOverrides;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "hostcache")]
#[command(version)]
#[command(about = "Resolve hostnames through a refreshing TTL cache")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Default TTL in seconds (0 disables background refresh)
    #[arg(long, value_name = "SECS")]
    default_ttl: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Only report IPv4 addresses
    #[arg(long)]
    v4: bool,

    /// Print one randomly picked address per host
    #[arg(long)]
    one: bool,

    /// Keep running and re-print every SECS seconds until interrupted
    #[arg(long, value_name = "SECS")]
    watch: Option<u64>,

    /// Hostnames to resolve
    #[arg(required = true)]
    hosts: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        default_ttl_secs: cli.default_ttl,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting hostcache v{}", env!("CARGO_PKG_VERSION"));

    let resolver = Resolver::from_config(&config.cache);

    let Some(every) = cli.watch else {
        let failures = print_hosts(&resolver, &cli).await;
        resolver.stop();
        if failures > 0 {
            anyhow::bail!("{failures} of {} host(s) failed to resolve", cli.hosts.len());
        }
        return Ok(());
    };

    let mut ticker = tokio::time::interval(Duration::from_secs(every.max(1)));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                print_hosts(&resolver, &cli).await;
                let stats = resolver.stats();
                info!(
                    entries = stats.entries,
                    hits = stats.hits,
                    misses = stats.misses,
                    refreshes = stats.refreshes,
                    "Cache stats"
                );
            }
        }
    }

    resolver.stop();
    info!("hostcache shutdown complete");
    Ok(())
}

/// Prints one line per host and returns how many failed.
async fn print_hosts(resolver: &Resolver, cli: &Cli) -> usize {
    let mut failures = 0;

    for host in &cli.hosts {
        let line = match (cli.one, cli.v4) {
            (true, false) => resolver.fetch_one_as_text(host).await,
            (true, true) => resolver.fetch_one_v4_as_text(host).await,
            (false, false) => resolver.fetch(host).await.map(|a| join_addresses(&a)),
            (false, true) => resolver.fetch_v4(host).await.map(|a| join_addresses(&a)),
        };

        match line {
            Ok(text) => println!("{host}\t{text}"),
            Err(e) => {
                failures += 1;
                warn!(host = %host, error = %e, "Resolution failed");
                eprintln!("{host}\terror: {e}");
            }
        }
    }

    failures
}

fn join_addresses(addresses: &[std::net::IpAddr]) -> String {
    addresses
        .iter()
        .map(|ip| ip.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
