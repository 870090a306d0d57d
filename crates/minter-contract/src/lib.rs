//! Contract binding module for the lazymint workspace.
//!
//! This module abstracts the verifying contract a voucher is bound to. A
//! binding exposes the contract's address and a chain-id query; it never
//! submits transactions. Redemption of vouchers happens in contract calls
//! made by other parties.

use alloy_primitives::Address;
use async_trait::async_trait;
use minter_types::{ConfigSchema, ImplementationRegistry};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod fixed;
	pub mod rpc;
}

/// Errors that can occur during contract binding operations.
#[derive(Debug, Error)]
pub enum ContractError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when the binding configuration is invalid.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the interface for contract binding implementations.
#[async_trait]
pub trait ContractInterface: Send + Sync {
	/// Returns the configuration schema for this binding implementation.
	///
	/// The schema is used to validate TOML configuration before the
	/// binding is constructed.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Returns the address of the bound contract.
	fn address(&self) -> Address;

	/// Queries the id of the chain the contract is deployed on.
	///
	/// This is the only network operation a binding performs; failures
	/// surface to the caller, which owns retry policy.
	async fn chain_id(&self) -> Result<u64, ContractError>;
}

/// Type alias for contract binding factory functions.
///
/// Factories receive the implementation's TOML table and the verifying
/// contract address configured at the `[contract]` level.
pub type ContractFactory =
	fn(&toml::Value, &Address) -> Result<Box<dyn ContractInterface>, ContractError>;

/// Registry trait for contract binding implementations.
pub trait ContractRegistry: ImplementationRegistry<Factory = ContractFactory> {}

/// Get all registered contract binding implementations.
///
/// Returns a vector of (name, factory) tuples for all available binding
/// implementations.
pub fn get_all_implementations() -> Vec<(&'static str, ContractFactory)> {
	use implementations::{fixed, rpc};

	vec![
		(fixed::Registry::NAME, fixed::Registry::factory()),
		(rpc::Registry::NAME, rpc::Registry::factory()),
	]
}

/// Service that manages the contract binding.
///
/// Wraps an underlying binding implementation behind a concrete type the
/// voucher layer can hold.
pub struct ContractService {
	/// The underlying binding implementation.
	implementation: Box<dyn ContractInterface>,
}

impl ContractService {
	/// Creates a new ContractService with the specified implementation.
	pub fn new(implementation: Box<dyn ContractInterface>) -> Self {
		Self { implementation }
	}

	/// Returns the address of the bound contract.
	pub fn address(&self) -> Address {
		self.implementation.address()
	}

	/// Queries the id of the chain the contract is deployed on.
	pub async fn chain_id(&self) -> Result<u64, ContractError> {
		self.implementation.chain_id().await
	}
}
