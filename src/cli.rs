use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "monero-light")]
#[command(about = "Query a Monero light wallet server with an address and private view key", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,
    #[command(subcommand)]
    pub command: Commands,
}

/// Options overriding the configuration file.
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    #[arg(short, long, global = true, help = "Path to the config file", default_value = "data/config.toml")]
    pub config: PathBuf,
    #[arg(short = 'u', long, global = true, help = "The base URL of the light wallet server")]
    pub base_url: Option<String>,
    #[arg(short, long, global = true, help = "The account's public address")]
    pub address: Option<String>,
    #[arg(short, long, global = true, alias = "view_key", help = "The account's private view key in hex format")]
    pub view_key: Option<String>,
    #[arg(long, global = true, help = "Retries after a 503 Service Unavailable reply")]
    pub max_retries: Option<u32>,
    #[arg(long, global = true, help = "Milliseconds to wait between retries")]
    pub retry_delay_ms: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check for the account on the server, optionally creating it
    Login {
        #[arg(long, help = "Create the account if the server does not know it")]
        create_account: bool,
        #[arg(long, help = "The address was generated by this client rather than imported")]
        generated_locally: bool,
    },
    /// Show balance totals and candidate spends
    AddressInfo,
    /// Show the transaction history
    AddressTxs,
    /// List received outputs that can cover an amount
    UnspentOuts {
        #[arg(short = 'm', long, help = "Amount to cover, in piconero")]
        amount: String,
        #[arg(long, help = "Ring size minus one", default_value_t = 15)]
        mixin: u32,
        #[arg(long, help = "Include dust outputs")]
        use_dust: bool,
        #[arg(long, help = "Outputs below this amount (piconero) count as dust", default_value = "2000000000")]
        dust_threshold: String,
    },
    /// Fetch decoy outputs for ring signatures
    RandomOuts {
        #[arg(short = 'n', long, help = "Number of decoys per amount", default_value_t = 16)]
        count: u32,
        #[arg(required = true, help = "Amounts needing decoys (\"0\" for RingCT outputs)")]
        amounts: Vec<String>,
    },
    /// Ask the server to rescan the account from the genesis block
    ImportRequest,
    /// Relay a signed transaction to the network
    SubmitRawTx {
        #[arg(short, long, help = "The signed transaction in hex format")]
        tx: String,
    },
}

/// Applies command line overrides on top of loaded configuration.
pub trait ApplyArgs {
    fn apply_connection(&mut self, args: &ConnectionArgs);
}
