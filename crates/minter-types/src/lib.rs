//! Common types module for the lazymint workspace.
//!
//! This module defines the core data types and structures shared by the
//! minter crates: voucher payloads and signing domains, NFT content records,
//! secret handling, and the validation plumbing used by pluggable
//! implementations.

/// NFT content records and content-addressed URIs.
pub mod metadata;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Zeroizing wrapper for secret material such as private keys.
pub mod secret;
/// EIP-712 hashing and formatting helpers.
pub mod utils;
/// Configuration validation types for implementation config tables.
pub mod validation;
/// Voucher payloads, signing domains, and signatures.
pub mod voucher;

// Re-export all types for convenient access
pub use metadata::*;
pub use registry::*;
pub use secret::*;
pub use utils::{
	compute_domain_hash, compute_final_digest, with_0x_prefix, without_0x_prefix,
	Eip712AbiEncoder, DOMAIN_TYPE, NFT_VOUCHER_TYPE, SIGNING_DOMAIN_NAME, SIGNING_DOMAIN_VERSION,
};
pub use validation::*;
pub use voucher::*;
