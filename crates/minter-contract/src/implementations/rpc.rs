//! RPC-backed contract binding using an Alloy HTTP provider.
//!
//! Queries the chain id from the network the contract lives on. The
//! provider is read-only; no wallet is attached and no transactions are
//! ever submitted through it.

use crate::{ContractError, ContractFactory, ContractInterface, ContractRegistry};
use alloy_primitives::Address;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_transport_http::Http;
use async_trait::async_trait;
use minter_types::{ConfigSchema, Field, FieldType, ImplementationRegistry, Schema, ValidationError};
use serde::Deserialize;
use std::sync::Arc;

/// Configuration for the RPC contract binding.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcContractConfig {
	/// HTTP RPC endpoint of the chain the contract is deployed on.
	pub rpc_url: String,
}

/// Contract binding that queries the chain id over RPC.
pub struct RpcContract {
	address: Address,
	provider: Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>,
}

impl RpcContract {
	/// Creates a binding for `address` reachable through the configured
	/// RPC endpoint.
	pub fn new(address: Address, config: &RpcContractConfig) -> Result<Self, ContractError> {
		let url = config
			.rpc_url
			.parse()
			.map_err(|e| ContractError::Configuration(format!("Invalid RPC URL: {}", e)))?;

		let provider = ProviderBuilder::new().on_http(url);

		Ok(Self {
			address,
			provider: Arc::new(provider) as Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>,
		})
	}
}

#[async_trait]
impl ContractInterface for RpcContract {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(RpcContractSchema)
	}

	fn address(&self) -> Address {
		self.address
	}

	async fn chain_id(&self) -> Result<u64, ContractError> {
		let chain_id = self
			.provider
			.get_chain_id()
			.await
			.map_err(|e| ContractError::Network(e.to_string()))?;
		tracing::debug!(chain_id, "Resolved chain id over RPC");
		Ok(chain_id)
	}
}

/// Configuration schema for the RPC contract binding.
pub struct RpcContractSchema;

impl ConfigSchema for RpcContractSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![Field::new("rpc_url", FieldType::String).with_validator(|value| {
				let url = value.as_str().unwrap_or_default();
				if url.starts_with("http://") || url.starts_with("https://") {
					Ok(())
				} else {
					Err("rpc_url must be an http(s) URL".to_string())
				}
			})],
			vec![],
		);
		schema.validate(config)
	}
}

/// Registry for the RPC contract binding implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "rpc";
	type Factory = ContractFactory;

	fn factory() -> Self::Factory {
		|config: &toml::Value, address: &Address| -> Result<Box<dyn ContractInterface>, ContractError> {
			RpcContractSchema
				.validate(config)
				.map_err(|e| ContractError::Configuration(e.to_string()))?;

			let rpc_config: RpcContractConfig = config.clone().try_into().map_err(|e| {
				ContractError::Configuration(format!("Invalid RPC binding config: {}", e))
			})?;

			Ok(Box::new(RpcContract::new(*address, &rpc_config)?))
		}
	}
}

impl ContractRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_schema_rejects_non_http_url() {
		let config: toml::Value = toml::from_str("rpc_url = \"ws://localhost:8546\"").unwrap();
		assert!(RpcContractSchema.validate(&config).is_err());
	}

	#[test]
	fn test_invalid_url_rejected_at_construction() {
		let config = RpcContractConfig {
			rpc_url: "http://".to_string(),
		};
		let address: Address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap();
		assert!(RpcContract::new(address, &config).is_err());
	}
}
