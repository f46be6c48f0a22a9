use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

mod shell;

use velum_bridges::{
    BridgeDirectory, BridgeSource, JsonRpcClient, DEFAULT_DIRECTORY_ADDRESS, DEFAULT_RPC_URL,
};
use velum_devnet::{DevBridgeDirectory, DevRollup, DevWallet};
use velum_sdk::{EthAddress, RollupConfig, WalletProvider};
use velum_session::AccountSessionController;

#[derive(Parser, Debug)]
#[command(name = "velum")]
#[command(about = "interactive shell for the velum rollup demo", long_about = None)]
struct Args {
    /// run against the in-memory devnet collaborators (the only mode
    /// with a local rollup client)
    #[arg(
        long,
        default_value_t = true,
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    devnet: bool,

    /// rollup provider endpoint recorded in the client configuration
    #[arg(long, default_value = "http://localhost:8081")]
    rollup_url: String,

    /// L1 JSON-RPC endpoint for the on-chain bridge directory; the
    /// devnet listing is used when unset, and a bare --rpc-url selects
    /// the default local endpoint
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_RPC_URL)]
    rpc_url: Option<String>,

    /// bridge directory contract address
    #[arg(long, default_value_t = DEFAULT_DIRECTORY_ADDRESS)]
    directory: EthAddress,
}

#[tokio::main]
async fn main() -> Result<()> {
    // initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "velum=info".into()),
        )
        .init();

    let args = Args::parse();
    if !args.devnet {
        anyhow::bail!("no live rollup client is wired in; run with --devnet");
    }

    let config = RollupConfig::devnet().with_server_url(&args.rollup_url);
    info!(
        server = %config.server_url,
        poll_ms = config.poll_interval_ms,
        memory_db = config.memory_db,
        "rollup client configuration"
    );

    let rollup = DevRollup::with_config(config);
    let wallet = DevWallet::with_default_accounts();
    let controller = Arc::new(AccountSessionController::new(
        Arc::new(rollup.clone()),
        Arc::new(wallet.clone()),
    ));
    // account switches invalidate the session in the background
    tokio::spawn(controller.clone().run_wallet_watcher(wallet.subscribe()));

    let bridges: Arc<dyn BridgeSource> = match &args.rpc_url {
        Some(url) => {
            info!(%url, directory = %args.directory, "using on-chain bridge directory");
            Arc::new(BridgeDirectory::new(
                JsonRpcClient::new(url),
                args.directory,
            ))
        }
        None => Arc::new(DevBridgeDirectory),
    };

    shell::Shell::new(controller, bridges, wallet).run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_to_devnet_collaborators() {
        let args = Args::try_parse_from(["velum"]).unwrap();
        assert!(args.devnet);
        assert_eq!(args.rollup_url, "http://localhost:8081");
        assert_eq!(args.rpc_url, None);
        assert_eq!(args.directory, DEFAULT_DIRECTORY_ADDRESS);
    }

    #[test]
    fn test_bare_rpc_url_flag_selects_the_default_endpoint() {
        let args = Args::try_parse_from(["velum", "--rpc-url"]).unwrap();
        assert_eq!(args.rpc_url.as_deref(), Some(DEFAULT_RPC_URL));

        let args = Args::try_parse_from(["velum", "--rpc-url", "http://10.0.0.5:8545"]).unwrap();
        assert_eq!(args.rpc_url.as_deref(), Some("http://10.0.0.5:8545"));
    }
}
