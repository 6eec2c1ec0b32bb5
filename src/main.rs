use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use serde::Serialize;

use monero_light::cli::{ApplyArgs, Cli, Commands};
use monero_light::config::load_configuration;
use monero_light::http::{LightWalletClient, LoginRequest, RandomOutsRequest, SubmitRawTxRequest, UnspentOutsRequest};
use monero_light::log::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();

    let mut config = load_configuration(&cli.connection.config)?;
    config.apply_connection(&cli.connection);

    let client =
        LightWalletClient::new(config.into_client_config()).context("Could not create light wallet client")?;
    debug!(base_url = client.base_url(); "Using light wallet server");

    match cli.command {
        Commands::Login {
            create_account,
            generated_locally,
        } => {
            let response = client
                .login(LoginRequest::new(create_account, generated_locally))
                .await
                .context("Login failed")?;
            print_json(&response)
        },
        Commands::AddressInfo => {
            let response = client.get_address_info().await.context("Could not get address info")?;
            print_json(&response)
        },
        Commands::AddressTxs => {
            let response = client
                .get_address_txs()
                .await
                .context("Could not get address transactions")?;
            print_json(&response)
        },
        Commands::UnspentOuts {
            amount,
            mixin,
            use_dust,
            dust_threshold,
        } => {
            let request = UnspentOutsRequest::new(amount, mixin, use_dust, dust_threshold);
            let response = client
                .get_unspent_outs(request)
                .await
                .context("Could not get unspent outputs")?;
            print_json(&response)
        },
        Commands::RandomOuts { count, amounts } => {
            let response = client
                .get_random_outs(RandomOutsRequest::new(count, amounts))
                .await
                .context("Could not get random outputs")?;
            print_json(&response)
        },
        Commands::ImportRequest => {
            let response = client.import_request().await.context("Import request failed")?;
            print_json(&response)
        },
        Commands::SubmitRawTx { tx } => {
            let response = client
                .submit_raw_tx(SubmitRawTxRequest::new(tx))
                .await
                .context("Could not submit transaction")?;
            print_json(&response)
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Could not format response")?;
    println!("{json}");
    Ok(())
}
