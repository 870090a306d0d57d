//! Signer module for the lazymint workspace.
//!
//! This module provides the typed-data signing capability vouchers depend
//! on. It defines the interface a signing implementation must provide (an
//! identity address and a digest signing operation) and a service wrapper
//! the rest of the workspace talks to.

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use minter_types::{ConfigSchema, ImplementationRegistry, Signature};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

/// Errors that can occur during signing operations.
#[derive(Debug, Error)]
pub enum SignerError {
	/// Error that occurs when a signing operation fails or is refused.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// Error that occurs when interacting with the signer implementation.
	#[error("Implementation error: {0}")]
	Implementation(String),
}

/// Trait defining the interface for signer implementations.
///
/// A signer is bound to one identity; it exposes that identity's address
/// and signs pre-hashed typed-data digests with it. Implementations are
/// assumed already connected and authorized by the time they are handed to
/// the voucher layer.
#[async_trait]
pub trait SignerInterface: Send + Sync {
	/// Returns the configuration schema for this signer implementation.
	///
	/// The schema is used to validate TOML configuration before the
	/// implementation is constructed.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Retrieves the address of the signer identity.
	async fn address(&self) -> Result<Address, SignerError>;

	/// Signs a 32-byte typed-data digest with the signer identity.
	///
	/// The digest is expected to already be the final EIP-712 digest; no
	/// message prefix is applied.
	async fn sign_digest(&self, digest: &B256) -> Result<Signature, SignerError>;
}

/// Type alias for signer factory functions.
///
/// This is the function signature all signer implementations provide to
/// create instances of their interface from configuration.
pub type SignerFactory = fn(&toml::Value) -> Result<Box<dyn SignerInterface>, SignerError>;

/// Registry trait for signer implementations.
pub trait SignerRegistry: ImplementationRegistry<Factory = SignerFactory> {}

/// Get all registered signer implementations.
///
/// Returns a vector of (name, factory) tuples for all available signer
/// implementations, used by the service wiring to resolve the configured
/// implementation by name.
pub fn get_all_implementations() -> Vec<(&'static str, SignerFactory)> {
	use implementations::local;

	vec![(local::Registry::NAME, local::Registry::factory())]
}

/// Service that manages signing operations.
///
/// Wraps an underlying signer implementation behind a concrete type the
/// voucher layer can hold.
pub struct SignerService {
	/// The underlying signer implementation.
	implementation: Box<dyn SignerInterface>,
}

impl SignerService {
	/// Creates a new SignerService with the specified implementation.
	pub fn new(implementation: Box<dyn SignerInterface>) -> Self {
		Self { implementation }
	}

	/// Retrieves the address of the managed signer identity.
	pub async fn address(&self) -> Result<Address, SignerError> {
		self.implementation.address().await
	}

	/// Signs a typed-data digest with the managed signer identity.
	pub async fn sign_digest(&self, digest: &B256) -> Result<Signature, SignerError> {
		self.implementation.sign_digest(digest).await
	}
}
