//! Configuration module for the lazymint workspace.
//!
//! This module provides structures and utilities for managing minter
//! configuration. It supports loading configuration from TOML files with
//! `${VAR}` environment-variable resolution and validates that all required
//! configuration values are properly set.

use alloy_primitives::Address;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the minter.
///
/// Contains all sections required for the service to operate: minter
/// identity, the verifying contract binding, the signer, the metadata
/// store, and the optional HTTP API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to this minter instance.
	pub minter: MinterConfig,
	/// Configuration for the verifying contract binding.
	pub contract: ContractConfig,
	/// Configuration for the voucher signer.
	pub signer: SignerConfig,
	/// Configuration for the metadata store.
	pub metadata: MetadataConfig,
	/// Configuration for the HTTP API server.
	pub api: Option<ApiConfig>,
}

/// Configuration specific to the minter instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MinterConfig {
	/// Unique identifier for this minter instance.
	pub id: String,
}

/// Configuration for the verifying contract binding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContractConfig {
	/// Address of the contract vouchers are bound to.
	pub address: String,
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of contract binding implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

/// Configuration for the voucher signer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignerConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of signer implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

/// Configuration for the metadata store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of metadata store implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
	/// Whether the API server is enabled.
	#[serde(default)]
	pub enabled: bool,
	/// Host address to bind the server to.
	#[serde(default = "default_api_host")]
	pub host: String,
	/// Port to bind the server to.
	#[serde(default = "default_api_port")]
	pub port: u16,
	/// Request timeout in seconds.
	#[serde(default = "default_api_timeout")]
	pub timeout_seconds: u64,
	/// Maximum request size in bytes.
	#[serde(default = "default_max_request_size")]
	pub max_request_size: usize,
}

/// Returns the default API host (localhost).
fn default_api_host() -> String {
	"127.0.0.1".to_string()
}

/// Returns the default API port.
fn default_api_port() -> u16 {
	3000
}

/// Returns the default API request timeout in seconds.
fn default_api_timeout() -> u64 {
	30
}

/// Returns the default maximum request size in bytes (8MB, sized for
/// hex-encoded image payloads).
fn default_max_request_size() -> usize {
	8 * 1024 * 1024
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).unwrap();
		let var_name = cap.get(1).unwrap().as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => {
				if let Some(default) = default_value {
					default.to_string()
				} else {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)));
				}
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads configuration from a file, resolving environment variables and
	/// validating the result.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let raw = tokio::fs::read_to_string(path).await?;
		raw.parse()
	}

	/// Validates the configuration to ensure all required fields are properly set.
	///
	/// - The minter id must be non-empty
	/// - The contract address must parse as a 20-byte hex address
	/// - Each section's primary implementation must be configured
	fn validate(&self) -> Result<(), ConfigError> {
		if self.minter.id.is_empty() {
			return Err(ConfigError::Validation("Minter ID cannot be empty".into()));
		}

		if self.contract.address.parse::<Address>().is_err() {
			return Err(ConfigError::Validation(format!(
				"Invalid contract address: {}",
				self.contract.address
			)));
		}

		validate_section("contract", &self.contract.primary, &self.contract.implementations)?;
		validate_section("signer", &self.signer.primary, &self.signer.implementations)?;
		validate_section("metadata", &self.metadata.primary, &self.metadata.implementations)?;

		Ok(())
	}

	/// Returns the verifying contract address.
	///
	/// Only valid after validation has succeeded, which `from_file` and
	/// `from_str` guarantee.
	pub fn contract_address(&self) -> Address {
		self.contract
			.address
			.parse()
			.expect("validated during config parsing")
	}
}

fn validate_section(
	section: &str,
	primary: &str,
	implementations: &HashMap<String, toml::Value>,
) -> Result<(), ConfigError> {
	if implementations.is_empty() {
		return Err(ConfigError::Validation(format!(
			"At least one {} implementation must be configured",
			section
		)));
	}
	if primary.is_empty() {
		return Err(ConfigError::Validation(format!(
			"{} primary implementation cannot be empty",
			section
		)));
	}
	if !implementations.contains_key(primary) {
		return Err(ConfigError::Validation(format!(
			"Primary {} '{}' not found in implementations",
			section, primary
		)));
	}
	Ok(())
}

/// Parses configuration from a TOML string.
///
/// Environment variables are resolved and the configuration is validated
/// after parsing.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
