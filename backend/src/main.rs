//! Statement Lens CLI - development stand-in for the statement parser
//!
//! ```bash
//! statement-lens serve                       # Start HTTP server (port 8080)
//! statement-lens serve --fixture-transactions 15
//! statement-lens fixture --issuer HDFC       # Print a fixture statement
//! statement-lens issuers                     # List supported issuers
//! ```

use clap::{Parser, Subcommand};
use statement_lens::{
    fixture_statement, fixtures, issuer_from_name, start_server, Issuer, ServerConfig, ServerResult,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "statement-lens")]
#[command(about = "Serve fixture credit card statements to the Statement Lens client", long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (default: STATEMENT_LENS_PORT or 8080)
        #[arg(short, long)]
        port: Option<u16>,

        /// Transactions per fixture statement
        #[arg(long)]
        fixture_transactions: Option<usize>,
    },

    /// Print a fixture statement as JSON
    Fixture {
        /// Issuer code or name (HDFC, ICICI, SBI, AXIS, AMEX)
        #[arg(short, long, default_value = "HDFC")]
        issuer: String,

        /// Number of transactions
        #[arg(short, long, default_value_t = 5)]
        transactions: usize,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported issuers
    Issuers,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG wins over --log-level
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .init();

    let result = match cli.command {
        Commands::Serve {
            port,
            fixture_transactions,
        } => cmd_serve(port, fixture_transactions).await.map_err(Into::into),

        Commands::Fixture {
            issuer,
            transactions,
            output,
        } => cmd_fixture(&issuer, transactions, output.as_deref()),

        Commands::Issuers => cmd_issuers(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(port: Option<u16>, fixture_transactions: Option<usize>) -> ServerResult<()> {
    let config = ServerConfig::from_env()?.with_overrides(port, fixture_transactions);
    start_server(config).await
}

fn cmd_fixture(
    issuer: &str,
    transactions: usize,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let issuer = issuer_from_name(issuer)?;
    let statement = fixture_statement(issuer, transactions);
    eprintln!("📄 Fixture for {} ({} transactions)", issuer, statement.transactions.len());

    match output {
        Some(path) => {
            fixtures::save_fixture(&statement, path)?;
            eprintln!("💾 Output written to: {}", path.display());
        }
        None => println!("{}", fixtures::to_json(&statement)?),
    }
    Ok(())
}

fn cmd_issuers() -> Result<(), Box<dyn std::error::Error>> {
    for issuer in Issuer::ALL {
        println!("  {:<6} {}", issuer.to_code(), issuer.display_name());
    }
    Ok(())
}
