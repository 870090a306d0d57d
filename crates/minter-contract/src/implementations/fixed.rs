//! Fixed contract binding with a configured chain id.
//!
//! Answers the chain-id query from configuration instead of the network.
//! Useful for offline development and tests where no RPC endpoint exists.

use crate::{ContractError, ContractFactory, ContractInterface, ContractRegistry};
use alloy_primitives::Address;
use async_trait::async_trait;
use minter_types::{ConfigSchema, Field, FieldType, ImplementationRegistry, Schema, ValidationError};
use serde::Deserialize;

/// Configuration for the fixed contract binding.
#[derive(Debug, Clone, Deserialize)]
pub struct FixedContractConfig {
	/// Chain id to report for the bound contract.
	pub chain_id: u64,
}

/// Contract binding that reports a configured chain id.
pub struct FixedContract {
	address: Address,
	chain_id: u64,
}

impl FixedContract {
	/// Creates a binding for `address` on the given chain.
	pub fn new(address: Address, chain_id: u64) -> Self {
		Self { address, chain_id }
	}
}

#[async_trait]
impl ContractInterface for FixedContract {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(FixedContractSchema)
	}

	fn address(&self) -> Address {
		self.address
	}

	async fn chain_id(&self) -> Result<u64, ContractError> {
		Ok(self.chain_id)
	}
}

/// Configuration schema for the fixed contract binding.
pub struct FixedContractSchema;

impl ConfigSchema for FixedContractSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![Field::new(
				"chain_id",
				FieldType::Integer {
					min: Some(1),
					max: None,
				},
			)],
			vec![],
		);
		schema.validate(config)
	}
}

/// Registry for the fixed contract binding implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "fixed";
	type Factory = ContractFactory;

	fn factory() -> Self::Factory {
		|config: &toml::Value, address: &Address| -> Result<Box<dyn ContractInterface>, ContractError> {
			FixedContractSchema
				.validate(config)
				.map_err(|e| ContractError::Configuration(e.to_string()))?;

			let fixed_config: FixedContractConfig = config.clone().try_into().map_err(|e| {
				ContractError::Configuration(format!("Invalid fixed binding config: {}", e))
			})?;

			Ok(Box::new(FixedContract::new(*address, fixed_config.chain_id)))
		}
	}
}

impl ContractRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_address() -> Address {
		"0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap()
	}

	#[tokio::test]
	async fn test_reports_configured_chain_id() {
		let binding = FixedContract::new(test_address(), 31337);
		assert_eq!(binding.chain_id().await.unwrap(), 31337);
		assert_eq!(binding.address(), test_address());
	}

	#[test]
	fn test_schema_rejects_zero_chain_id() {
		let config: toml::Value = toml::from_str("chain_id = 0").unwrap();
		assert!(FixedContractSchema.validate(&config).is_err());
	}

	#[test]
	fn test_factory_builds_binding() {
		let config: toml::Value = toml::from_str("chain_id = 31337").unwrap();
		let factory = Registry::factory();
		assert!(factory(&config, &test_address()).is_ok());
	}
}
