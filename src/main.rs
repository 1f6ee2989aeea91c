use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use contract_sweep::{app, config};

#[derive(Debug, Parser)]
#[command(
    name = "contract-sweep",
    version,
    about = "Find funded contracts in a deployment export and flag the ones that are not tokens"
)]
struct Args {
    /// TOML config file (defaults to $CONTRACT_SWEEP_CONFIG or the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint, overrides RPC_URL (http(s):// or ws(s)://)
    #[arg(long)]
    rpc: Option<String>,

    /// Block-explorer API key, overrides BASESCAN_API_KEY
    #[arg(long)]
    api_key: Option<String>,

    /// Input CSV of contract deployments
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output CSV of funded contracts
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Etherscan-compatible API endpoint
    #[arg(long)]
    explorer_url: Option<String>,

    /// Abort when a log query fails instead of counting it as zero events
    #[arg(long)]
    strict_logs: bool,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn overrides(&self) -> config::Overrides {
        config::Overrides {
            config: self.config.clone(),
            rpc: self.rpc.clone(),
            api_key: self.api_key.clone(),
            input: self.input.clone(),
            output: self.output.clone(),
            explorer_url: self.explorer_url.clone(),
            strict_logs: self.strict_logs,
        }
    }

    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = config::load(&args.overrides())?;
    app::run(&settings).await?;

    println!("Results saved to {}", settings.output.display());
    Ok(())
}
