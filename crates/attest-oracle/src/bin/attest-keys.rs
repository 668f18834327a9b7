//! Key inspection tool
//!
//! Validates the configured oracle key material and prints the derived
//! public key, so deployments can hand the verification key to downstream
//! consumers without ever exposing the secret scalar.

use anyhow::Context;
use attest_crypto::OracleKeyMaterial;
use attest_oracle::OracleConfig;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "attest-keys", about = "Oracle key material utilities")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derive and print the oracle public key from the environment
    PublicKey,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::PublicKey => {
            let config = OracleConfig::from_env().context("loading oracle configuration")?;
            let keys = OracleKeyMaterial::from_hex(&config.private_key_hex)
                .context("key material is invalid; the oracle must not serve requests")?;
            println!("{}", keys.public_key_hex());
        }
    }
    Ok(())
}
