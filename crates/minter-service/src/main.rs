//! Main entry point for the minter service.
//!
//! This binary wires the configured implementations together and serves the
//! mint API: content uploads go to the metadata store, vouchers are signed
//! by the configured signer, and everything is bound to one verifying
//! contract. On-chain redemption of the issued vouchers is out of scope.

use clap::Parser;
use minter_config::Config;
use minter_contract::ContractService;
use minter_core::MinterEngine;
use minter_metadata::MetadataStoreService;
use minter_signer::SignerService;
use minter_voucher::VoucherBuilder;
use std::path::PathBuf;
use std::sync::Arc;

mod apis;
mod server;

/// Command-line arguments for the minter service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the minter service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the mint engine from the configured implementations
/// 5. Serves the HTTP API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	tracing::info!("Started minter");

	// Load configuration
	let config = Config::from_file(args.config.to_str().unwrap()).await?;
	tracing::info!("Loaded configuration [{}]", config.minter.id);

	let engine = build_engine(&config)?;

	let api_enabled = config.api.as_ref().is_some_and(|api| api.enabled);
	if api_enabled {
		let api_config = config.api.as_ref().unwrap().clone();
		server::start_server(api_config, engine).await?;
	} else {
		tracing::warn!("API server disabled in configuration; nothing to serve");
	}

	tracing::info!("Stopped minter");
	Ok(())
}

/// Builds the mint engine from the configured implementations.
///
/// Resolves each section's primary implementation through the registered
/// factories: the signer identity, the contract binding vouchers commit
/// to, and the metadata store content is uploaded to.
fn build_engine(config: &Config) -> Result<Arc<MinterEngine>, Box<dyn std::error::Error>> {
	// Signer
	let signer_factories: std::collections::HashMap<_, _> =
		minter_signer::get_all_implementations().into_iter().collect();
	let signer_factory = signer_factories
		.get(config.signer.primary.as_str())
		.ok_or_else(|| format!("Unknown signer implementation '{}'", config.signer.primary))?;
	let signer_config = config
		.signer
		.implementations
		.get(&config.signer.primary)
		.ok_or_else(|| format!("Missing configuration for signer '{}'", config.signer.primary))?;
	let signer = Arc::new(SignerService::new(signer_factory(signer_config)?));

	// Contract binding
	let contract_address = config.contract_address();
	let contract_factories: std::collections::HashMap<_, _> =
		minter_contract::get_all_implementations().into_iter().collect();
	let contract_factory = contract_factories
		.get(config.contract.primary.as_str())
		.ok_or_else(|| {
			format!("Unknown contract implementation '{}'", config.contract.primary)
		})?;
	let contract_config = config
		.contract
		.implementations
		.get(&config.contract.primary)
		.ok_or_else(|| {
			format!("Missing configuration for contract '{}'", config.contract.primary)
		})?;
	let contract = Arc::new(ContractService::new(contract_factory(
		contract_config,
		&contract_address,
	)?));

	// Metadata store
	let metadata_factories: std::collections::HashMap<_, _> =
		minter_metadata::get_all_implementations().into_iter().collect();
	let metadata_factory = metadata_factories
		.get(config.metadata.primary.as_str())
		.ok_or_else(|| {
			format!("Unknown metadata implementation '{}'", config.metadata.primary)
		})?;
	let metadata_config = config
		.metadata
		.implementations
		.get(&config.metadata.primary)
		.ok_or_else(|| {
			format!("Missing configuration for metadata store '{}'", config.metadata.primary)
		})?;
	let metadata = Arc::new(MetadataStoreService::new(metadata_factory(metadata_config)?));

	let vouchers = Arc::new(VoucherBuilder::new(contract, signer));

	Ok(Arc::new(MinterEngine::new(metadata, vouchers)))
}
