//! Local private-key signer implementation.
//!
//! Signs voucher digests with an in-process secp256k1 key loaded from
//! configuration. Suited to development and self-hosted minters; a remote
//! or hardware signer would sit behind the same interface.

use crate::{SignerError, SignerFactory, SignerInterface, SignerRegistry};
use alloy_primitives::{Address, B256};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use minter_types::{
	without_0x_prefix, ConfigSchema, Field, FieldType, ImplementationRegistry, Schema, SecretKey,
	Signature, ValidationError,
};
use serde::Deserialize;

/// Configuration for the local signer.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalSignerConfig {
	/// Hex-encoded secp256k1 private key, with or without a 0x prefix.
	pub private_key: SecretKey,
}

/// Signer backed by an in-process private key.
pub struct LocalSigner {
	/// The parsed signing key.
	inner: PrivateKeySigner,
}

impl LocalSigner {
	/// Creates a signer from the configured private key.
	pub fn new(private_key: &SecretKey) -> Result<Self, SignerError> {
		let inner = private_key
			.expose()
			.parse::<PrivateKeySigner>()
			.map_err(|e| SignerError::InvalidKey(e.to_string()))?;
		Ok(Self { inner })
	}
}

#[async_trait]
impl SignerInterface for LocalSigner {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(LocalSignerSchema)
	}

	async fn address(&self) -> Result<Address, SignerError> {
		Ok(self.inner.address())
	}

	async fn sign_digest(&self, digest: &B256) -> Result<Signature, SignerError> {
		let signature = self
			.inner
			.sign_hash(digest)
			.await
			.map_err(|e| SignerError::SigningFailed(e.to_string()))?;
		Ok(Signature(signature.as_bytes().to_vec()))
	}
}

/// Configuration schema for the local signer.
pub struct LocalSignerSchema;

impl ConfigSchema for LocalSignerSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![
				Field::new("private_key", FieldType::String).with_validator(|value| {
					let key = without_0x_prefix(value.as_str().unwrap_or_default());
					if key.len() == 64 && key.chars().all(|c| c.is_ascii_hexdigit()) {
						Ok(())
					} else {
						Err("private_key must be a 32-byte hex string".to_string())
					}
				}),
			],
			vec![],
		);
		schema.validate(config)
	}
}

/// Registry for the local signer implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "local";
	type Factory = SignerFactory;

	fn factory() -> Self::Factory {
		|config: &toml::Value| -> Result<Box<dyn SignerInterface>, SignerError> {
			LocalSignerSchema
				.validate(config)
				.map_err(|e| SignerError::Implementation(e.to_string()))?;

			let local_config: LocalSignerConfig = config.clone().try_into().map_err(|e| {
				SignerError::Implementation(format!("Invalid local signer config: {}", e))
			})?;

			Ok(Box::new(LocalSigner::new(&local_config.private_key)?))
		}
	}
}

impl SignerRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::keccak256;

	// Well-known anvil development key
	const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
	const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

	#[tokio::test]
	async fn test_address_matches_key() {
		let signer = LocalSigner::new(&SecretKey::from(TEST_KEY)).unwrap();
		let expected: Address = TEST_ADDRESS.parse().unwrap();
		assert_eq!(signer.address().await.unwrap(), expected);
	}

	#[tokio::test]
	async fn test_sign_digest_produces_65_bytes() {
		let signer = LocalSigner::new(&SecretKey::from(TEST_KEY)).unwrap();
		let digest = keccak256(b"voucher digest");
		let signature = signer.sign_digest(&digest).await.unwrap();
		assert_eq!(signature.0.len(), 65);
	}

	#[test]
	fn test_invalid_key_rejected() {
		let result = LocalSigner::new(&SecretKey::from("not-a-key"));
		assert!(matches!(result, Err(SignerError::InvalidKey(_))));
	}

	#[test]
	fn test_schema_rejects_short_key() {
		let config: toml::Value = toml::from_str("private_key = \"0xabcd\"").unwrap();
		assert!(LocalSignerSchema.validate(&config).is_err());
	}

	#[test]
	fn test_factory_builds_signer() {
		let config: toml::Value =
			toml::from_str(&format!("private_key = \"{}\"", TEST_KEY)).unwrap();
		let factory = Registry::factory();
		assert!(factory(&config).is_ok());
	}
}
