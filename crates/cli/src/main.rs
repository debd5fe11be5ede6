use clap::{Parser, Subcommand};
use ferrous_resolve_domain::config::CliOverrides;
use ferrous_resolve_domain::RecordType;
use tracing::debug;

mod bootstrap;
mod di;
mod output;

#[derive(Parser)]
#[command(name = "ferrous-resolve")]
#[command(version)]
#[command(about = "Ferrous Resolve - Stub DNS resolver over UDP and TCP")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Name server to query (ip, ip:port or [ipv6]:port)
    #[arg(short = 's', long)]
    server: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(short = 't', long)]
    timeout_ms: Option<u64>,

    /// Send queries over TCP instead of UDP
    #[arg(long)]
    tcp: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a domain to its addresses
    Lookup {
        domain: String,

        /// Ask for AAAA records instead of A
        #[arg(short = '6', long)]
        ipv6: bool,
    },

    /// Resolve an IP address to its PTR name
    Reverse { address: String },

    /// Send a single question and print the full response
    Query {
        domain: String,

        #[arg(short = 'T', long = "type", default_value = "A")]
        record_type: RecordType,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        server: cli.server.clone(),
        timeout_ms: cli.timeout_ms,
        force_tcp: cli.tcp,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    debug!("Starting Ferrous Resolve v{}", env!("CARGO_PKG_VERSION"));

    let services = di::DnsServices::new(&config)?;
    let client = &services.client;

    match cli.command {
        Command::Lookup { domain, ipv6 } => {
            let record_type = if ipv6 { RecordType::AAAA } else { RecordType::A };
            let addresses = client.lookup(&domain, record_type)?;
            output::print_addresses(&addresses);
        }
        Command::Reverse { address } => {
            let name = client.reverse_str(&address)?;
            output::print_name(&name);
        }
        Command::Query {
            domain,
            record_type,
        } => {
            let response = client.query(&domain, record_type)?;
            output::print_response(&response);
        }
    }

    Ok(())
}
