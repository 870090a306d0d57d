//! In-memory metadata store backend.
//!
//! Content-addresses blobs by their keccak-256 hash and serves them back
//! under `ipfs://`-style URIs. Nothing persists across restarts; this
//! backend exists for development and tests.

use crate::{MetadataError, MetadataStoreInterface};
use alloy_primitives::keccak256;
use async_trait::async_trait;
use minter_types::{ConfigSchema, ContentUri, Schema, ValidationError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory, content-addressed store.
#[derive(Clone)]
pub struct MemoryMetadataStore {
	/// Blobs keyed by their content hash.
	store: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryMetadataStore {
	/// Creates a new MemoryMetadataStore instance.
	pub fn new() -> Self {
		Self {
			store: Arc::new(RwLock::new(HashMap::new())),
		}
	}

	/// Returns the blob stored under `uri`, if any.
	pub async fn retrieve(&self, uri: &ContentUri) -> Option<Vec<u8>> {
		let store = self.store.read().await;
		store.get(uri.ipfs_path()).cloned()
	}
}

impl Default for MemoryMetadataStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl MetadataStoreInterface for MemoryMetadataStore {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(MemoryMetadataStoreSchema)
	}

	async fn store_blob(
		&self,
		content: &[u8],
		_content_type: &str,
	) -> Result<ContentUri, MetadataError> {
		let key = hex::encode(keccak256(content));
		let mut store = self.store.write().await;
		store.insert(key.clone(), content.to_vec());
		Ok(ContentUri::new(format!("ipfs://{}", key)))
	}
}

/// Configuration schema for MemoryMetadataStore.
pub struct MemoryMetadataStoreSchema;

impl ConfigSchema for MemoryMetadataStoreSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		// Memory storage has no required configuration
		let schema = Schema::new(vec![], vec![]);
		schema.validate(config)
	}
}

/// Registry for the in-memory metadata store implementation.
pub struct Registry;

impl minter_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "memory";
	type Factory = crate::MetadataStoreFactory;

	fn factory() -> Self::Factory {
		|_config: &toml::Value| Ok(Box::new(MemoryMetadataStore::new()))
	}
}

impl crate::MetadataStoreRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::MetadataStoreService;

	#[tokio::test]
	async fn test_blob_round_trip() {
		let store = MemoryMetadataStore::new();
		let uri = store.store_blob(b"image bytes", "image/png").await.unwrap();
		assert!(uri.is_ipfs());
		assert_eq!(store.retrieve(&uri).await.unwrap(), b"image bytes");
	}

	#[tokio::test]
	async fn test_identical_content_shares_uri() {
		let store = MemoryMetadataStore::new();
		let first = store.store_blob(b"same", "image/png").await.unwrap();
		let second = store.store_blob(b"same", "image/png").await.unwrap();
		assert_eq!(first, second);
	}

	#[tokio::test]
	async fn test_store_nft_links_image_into_record() {
		let store = MemoryMetadataStore::new();
		let service = MetadataStoreService::new(Box::new(store.clone()));

		let stored = service
			.store_nft("Sunset", "A sunset over the bay", b"image bytes")
			.await
			.unwrap();

		let record_bytes = store.retrieve(&stored.metadata_uri).await.unwrap();
		let record: minter_types::NftMetadata = serde_json::from_slice(&record_bytes).unwrap();
		assert_eq!(record.name, "Sunset");
		assert_eq!(record.image, stored.image_uri);
	}

	#[tokio::test]
	async fn test_store_nft_rejects_empty_name() {
		let service = MetadataStoreService::new(Box::new(MemoryMetadataStore::new()));
		let result = service.store_nft("  ", "desc", b"image").await;
		assert!(matches!(result, Err(MetadataError::InvalidRecord(_))));
	}

	#[tokio::test]
	async fn test_store_nft_rejects_empty_image() {
		let service = MetadataStoreService::new(Box::new(MemoryMetadataStore::new()));
		let result = service.store_nft("Sunset", "desc", b"").await;
		assert!(matches!(result, Err(MetadataError::InvalidRecord(_))));
	}
}
