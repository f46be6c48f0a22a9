//! interactive command loop
//!
//! the command set on offer is a pure function of the session status;
//! dispatch hands straight to the controller and every tagged failure
//! comes back as a printed message, not a silent log line.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use velum_bridges::{BridgeDescriptor, BridgeSource};
use velum_devnet::DevWallet;
use velum_sdk::{parse_base_units, AssetId};
use velum_session::{AccountSessionController, SessionError, SessionStatus};

pub struct Shell {
    controller: Arc<AccountSessionController>,
    bridges: Arc<dyn BridgeSource>,
    wallet: DevWallet,
}

impl Shell {
    pub fn new(
        controller: Arc<AccountSessionController>,
        bridges: Arc<dyn BridgeSource>,
        wallet: DevWallet,
    ) -> Self {
        Self {
            controller,
            bridges,
            wallet,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        println!("velum demo shell, type 'help' for commands");
        println!(
            "wallet detected with {} accounts; rollup client ready",
            self.wallet.accounts().len()
        );
        self.render_status().await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("velum> ");
            std::io::stdout().flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            debug!(command = line, "dispatching");

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.as_slice() {
                ["quit"] | ["exit"] | ["q"] => break,
                ["help"] | ["?"] => self.print_help().await,
                ["status"] => self.render_status().await,
                ["connect"] => self.cmd_connect().await,
                ["register", alias, amount] => self.cmd_register(alias, amount).await,
                ["deposit", amount] => self.cmd_deposit(amount).await,
                ["bridge", amount] => self.cmd_bridge(amount, None).await,
                ["bridge", amount, ratio] => self.cmd_bridge(amount, Some(ratio)).await,
                ["balance"] => self.cmd_balance().await,
                ["bridges"] => self.cmd_bridges().await,
                ["switch", index] => self.cmd_switch(index).await,
                _ => println!("unrecognized command; type 'help'"),
            }
        }
        println!("bye");
        Ok(())
    }

    async fn cmd_connect(&self) {
        match self.controller.connect().await {
            Ok(status) if status.registered => {
                println!("Welcome back!");
                self.render(&status);
            }
            Ok(status) => {
                println!("connected; register an alias to get started");
                self.render(&status);
            }
            Err(err) => report(&err),
        }
    }

    async fn cmd_register(&self, alias: &str, amount: &str) {
        match self.controller.register_account(alias, amount).await {
            Ok(tx) => println!("registration submitted, tx {tx}"),
            Err(err) => report(&err),
        }
    }

    async fn cmd_deposit(&self, amount: &str) {
        match self.controller.deposit_eth(amount).await {
            Ok(tx) => println!("deposit submitted, tx {tx}"),
            Err(err) => report(&err),
        }
    }

    async fn cmd_bridge(&self, amount: &str, ratio: Option<&str>) {
        // the floor is a decimal output-per-input price, same scaling
        // as amounts
        let min_ratio = match ratio.map(parse_base_units).transpose() {
            Ok(parsed) => parsed,
            Err(err) => {
                println!("error: bad min_ratio: {err}");
                return;
            }
        };
        match self
            .controller
            .bridge_assets(amount, "eth", "wsteth", min_ratio)
            .await
        {
            Ok(tx) => println!("bridge submitted, tx {tx}"),
            Err(err) => report(&err),
        }
    }

    async fn cmd_balance(&self) {
        match self.controller.balances().await {
            Ok(balances) => {
                for balance in balances {
                    println!(
                        "  {:<8} {:>26}  (asset {})",
                        balance.symbol, balance.display, balance.asset
                    );
                }
            }
            Err(err) => report(&err),
        }
    }

    async fn cmd_bridges(&self) {
        match self.bridges.list_bridges().await {
            Ok(bridges) if bridges.is_empty() => println!("no bridges listed"),
            Ok(bridges) => {
                for bridge in bridges.values() {
                    println!("{}", describe_bridge(bridge));
                }
            }
            Err(err) => println!("error: {err}"),
        }
    }

    async fn cmd_switch(&self, index: &str) {
        let Ok(index) = index.parse::<usize>() else {
            println!("switch takes an account index, e.g. 'switch 1'");
            return;
        };
        match self.wallet.switch_account(index).await {
            Ok(address) => {
                println!("active account is now {address}; session reset, connect again");
            }
            Err(err) => println!("error: {err}"),
        }
    }

    async fn render_status(&self) {
        self.render(&self.controller.status().await);
    }

    fn render(&self, status: &SessionStatus) {
        match status.wallet_address {
            Some(address) => {
                let registration = if status.registered {
                    "registered"
                } else {
                    "unregistered"
                };
                println!("session: {address} ({registration})");
            }
            None => println!("session: not connected"),
        }
        if let Some(tx) = status.last_tx {
            println!("last tx: {tx}");
        }
        println!("commands: {}", available_commands(status).join(", "));
    }

    async fn print_help(&self) {
        let status = self.controller.status().await;
        println!("available now: {}", available_commands(&status).join(", "));
        println!("always: bridges, status, help, quit");
        println!();
        println!("  connect                    connect the wallet and build a session");
        println!("  register <alias> <amount>  register an alias, funding with ETH");
        println!("  deposit <amount>           shield L1 ETH onto the rollup");
        println!("  bridge <amount> [ratio]    swap ETH to wstETH through the bridge");
        println!("  balance                    show shielded balances");
        println!("  bridges                    list the bridge directory");
        println!("  switch <index>             switch the devnet wallet account");
    }
}

/// commands unlocked by the current session state; always-available
/// ones (bridges, status, help, quit) are not repeated here
fn available_commands(status: &SessionStatus) -> Vec<&'static str> {
    let mut commands = Vec::new();
    if !status.connected {
        commands.push("connect");
    }
    if status.connected && status.has_signer && !status.registered {
        commands.push("register <alias> <amount>");
    }
    if status.connected && status.has_signer {
        commands.push("deposit <amount>");
        commands.push("bridge <amount> [min_ratio]");
    }
    if status.connected {
        commands.push("balance");
    }
    commands.push("switch <index>");
    commands
}

fn describe_bridge(bridge: &BridgeDescriptor) -> String {
    let pairs = if bridge.asset_pairs.is_empty() {
        "no routable pairs".to_string()
    } else {
        bridge
            .asset_pairs
            .iter()
            .map(|pair| format!("{}->{}", asset_label(pair.input), asset_label(pair.output)))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "  [{}] {} at {} ({})",
        bridge.id, bridge.name, bridge.address, pairs
    )
}

fn asset_label(asset: AssetId) -> String {
    match asset {
        AssetId::ETH => "eth".to_string(),
        AssetId::WSTETH => "wstETH".to_string(),
        other => format!("asset{other}"),
    }
}

fn report(err: &SessionError) {
    println!("error: {err}");
    if matches!(err, SessionError::Busy) {
        println!("wait for the current operation to finish and retry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velum_sdk::EthAddress;

    fn connected(registered: bool) -> SessionStatus {
        SessionStatus {
            connected: true,
            registered,
            has_signer: true,
            wallet_address: Some(EthAddress([0x11; 20])),
            last_tx: None,
        }
    }

    #[test]
    fn test_disconnected_offers_connect_only() {
        let commands = available_commands(&SessionStatus::default());
        assert!(commands.contains(&"connect"));
        assert!(!commands.iter().any(|c| c.starts_with("deposit")));
        assert!(!commands.iter().any(|c| c.starts_with("register")));
        assert!(!commands.contains(&"balance"));
    }

    #[test]
    fn test_unregistered_session_offers_register() {
        let commands = available_commands(&connected(false));
        assert!(!commands.contains(&"connect"));
        assert!(commands.iter().any(|c| c.starts_with("register")));
        assert!(commands.iter().any(|c| c.starts_with("deposit")));
        assert!(commands.iter().any(|c| c.starts_with("bridge")));
        assert!(commands.contains(&"balance"));
    }

    #[test]
    fn test_registered_session_hides_register() {
        let commands = available_commands(&connected(true));
        assert!(!commands.iter().any(|c| c.starts_with("register")));
        assert!(commands.iter().any(|c| c.starts_with("deposit")));
    }

    #[test]
    fn test_bridge_description_names_pairs() {
        use velum_bridges::AssetPair;
        let text = describe_bridge(&BridgeDescriptor {
            name: "CurveStEthBridge".into(),
            id: 6,
            address: EthAddress([0x22; 20]),
            asset_pairs: vec![AssetPair::new(AssetId::ETH, AssetId::WSTETH)],
        });
        assert!(text.contains("[6] CurveStEthBridge"));
        assert!(text.contains("eth->wstETH"));
    }
}
