//! Metadata store module for the lazymint workspace.
//!
//! This module provides abstractions for uploading NFT content to a
//! content-addressed store, supporting different backends such as an
//! in-memory store for development and an HTTP pinning service for
//! production. Uploads are not retried here; failures surface to the
//! caller, which owns retry policy.

use async_trait::async_trait;
use minter_types::{ConfigSchema, ContentUri, ImplementationRegistry, NftMetadata};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod http;
	pub mod memory;
}

/// Errors that can occur during metadata store operations.
#[derive(Debug, Error)]
pub enum MetadataError {
	/// Error that occurs when an upload fails or is rejected.
	#[error("Upload failed: {0}")]
	Upload(String),
	/// Error that occurs during serialization of a metadata record.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
	/// Error that occurs when the content record is not mintable.
	#[error("Invalid content: {0}")]
	InvalidRecord(String),
}

/// Trait defining the low-level interface for metadata store backends.
///
/// A backend stores opaque blobs and returns content URIs for them. The
/// two-step NFT upload (image, then the metadata record referencing it)
/// lives in [`MetadataStoreService`] so every backend shares it.
#[async_trait]
pub trait MetadataStoreInterface: Send + Sync {
	/// Returns the configuration schema for this store implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Uploads a blob and returns its content URI.
	async fn store_blob(&self, content: &[u8], content_type: &str)
		-> Result<ContentUri, MetadataError>;
}

/// Type alias for metadata store factory functions.
pub type MetadataStoreFactory =
	fn(&toml::Value) -> Result<Box<dyn MetadataStoreInterface>, MetadataError>;

/// Registry trait for metadata store implementations.
pub trait MetadataStoreRegistry: ImplementationRegistry<Factory = MetadataStoreFactory> {}

/// Get all registered metadata store implementations.
///
/// Returns a vector of (name, factory) tuples for all available store
/// implementations.
pub fn get_all_implementations() -> Vec<(&'static str, MetadataStoreFactory)> {
	use implementations::{http, memory};

	vec![
		(http::Registry::NAME, http::Registry::factory()),
		(memory::Registry::NAME, memory::Registry::factory()),
	]
}

/// The URIs produced by a completed NFT upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredNft {
	/// URI of the uploaded image.
	pub image_uri: ContentUri,
	/// URI of the uploaded metadata record.
	pub metadata_uri: ContentUri,
}

/// High-level metadata store service.
///
/// Wraps a store backend and provides the NFT upload flow: store the image,
/// build the metadata record referencing it, store the record, and hand
/// both URIs back.
pub struct MetadataStoreService {
	/// The underlying store backend implementation.
	backend: Box<dyn MetadataStoreInterface>,
}

impl MetadataStoreService {
	/// Creates a new MetadataStoreService with the specified backend.
	pub fn new(backend: Box<dyn MetadataStoreInterface>) -> Self {
		Self { backend }
	}

	/// Uploads an image and its metadata record, returning both URIs.
	///
	/// The name must be non-empty and the image must carry at least one
	/// byte; content failing either check never reaches the backend.
	pub async fn store_nft(
		&self,
		name: &str,
		description: &str,
		image: &[u8],
	) -> Result<StoredNft, MetadataError> {
		if name.trim().is_empty() {
			return Err(MetadataError::InvalidRecord("name cannot be empty".to_string()));
		}
		if image.is_empty() {
			return Err(MetadataError::InvalidRecord("image cannot be empty".to_string()));
		}

		let image_uri = self
			.backend
			.store_blob(image, "application/octet-stream")
			.await?;

		let record = NftMetadata {
			name: name.to_string(),
			description: description.to_string(),
			image: image_uri.clone(),
		};
		let record_bytes = serde_json::to_vec(&record)
			.map_err(|e| MetadataError::Serialization(e.to_string()))?;

		let metadata_uri = self
			.backend
			.store_blob(&record_bytes, "application/json")
			.await?;

		Ok(StoredNft {
			image_uri,
			metadata_uri,
		})
	}
}
