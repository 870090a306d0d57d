//! HTTP metadata store backend.
//!
//! Uploads blobs to an nft.storage-compatible pinning service: POST the
//! body to `{api_url}/upload` with a bearer token and read the content id
//! from the JSON response. The service pins the content and serves it
//! under `ipfs://<cid>`.

use crate::{MetadataError, MetadataStoreFactory, MetadataStoreInterface, MetadataStoreRegistry};
use async_trait::async_trait;
use minter_types::{
	ConfigSchema, ContentUri, Field, FieldType, ImplementationRegistry, Schema, SecretKey,
	ValidationError,
};
use serde::Deserialize;
use std::time::Duration;

/// Configuration for the HTTP metadata store.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpMetadataStoreConfig {
	/// Base URL of the pinning service, e.g. "https://api.nft.storage".
	pub api_url: String,
	/// Bearer token for the pinning service.
	pub api_token: SecretKey,
	/// Upload timeout in seconds.
	#[serde(default = "default_timeout_seconds")]
	pub timeout_seconds: u64,
}

/// Returns the default upload timeout in seconds.
fn default_timeout_seconds() -> u64 {
	60
}

/// Response body of a successful upload.
#[derive(Debug, Deserialize)]
struct UploadResponse {
	ok: bool,
	value: UploadValue,
}

#[derive(Debug, Deserialize)]
struct UploadValue {
	cid: String,
}

/// Metadata store backed by an HTTP pinning service.
pub struct HttpMetadataStore {
	client: reqwest::Client,
	api_url: String,
	api_token: SecretKey,
}

impl HttpMetadataStore {
	/// Creates a store client for the configured service.
	pub fn new(config: HttpMetadataStoreConfig) -> Result<Self, MetadataError> {
		let client = reqwest::Client::builder()
			.timeout(Duration::from_secs(config.timeout_seconds))
			.build()
			.map_err(|e| MetadataError::Configuration(e.to_string()))?;

		Ok(Self {
			client,
			api_url: config.api_url.trim_end_matches('/').to_string(),
			api_token: config.api_token,
		})
	}
}

#[async_trait]
impl MetadataStoreInterface for HttpMetadataStore {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(HttpMetadataStoreSchema)
	}

	async fn store_blob(
		&self,
		content: &[u8],
		content_type: &str,
	) -> Result<ContentUri, MetadataError> {
		let response = self
			.client
			.post(format!("{}/upload", self.api_url))
			.bearer_auth(self.api_token.expose())
			.header(reqwest::header::CONTENT_TYPE, content_type)
			.body(content.to_vec())
			.send()
			.await
			.map_err(|e| MetadataError::Upload(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(MetadataError::Upload(format!(
				"Store responded with status {}: {}",
				status, body
			)));
		}

		let body: UploadResponse = response
			.json()
			.await
			.map_err(|e| MetadataError::Serialization(e.to_string()))?;

		if !body.ok {
			return Err(MetadataError::Upload("Store rejected the upload".to_string()));
		}

		tracing::debug!(cid = %body.value.cid, "Uploaded blob to pinning service");
		Ok(ContentUri::new(format!("ipfs://{}", body.value.cid)))
	}
}

/// Configuration schema for the HTTP metadata store.
pub struct HttpMetadataStoreSchema;

impl ConfigSchema for HttpMetadataStoreSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![
				Field::new("api_url", FieldType::String).with_validator(|value| {
					let url = value.as_str().unwrap_or_default();
					if url.starts_with("http://") || url.starts_with("https://") {
						Ok(())
					} else {
						Err("api_url must be an http(s) URL".to_string())
					}
				}),
				Field::new("api_token", FieldType::String),
			],
			vec![Field::new(
				"timeout_seconds",
				FieldType::Integer {
					min: Some(1),
					max: Some(600),
				},
			)],
		);
		schema.validate(config)
	}
}

/// Registry for the HTTP metadata store implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "http";
	type Factory = MetadataStoreFactory;

	fn factory() -> Self::Factory {
		|config: &toml::Value| -> Result<Box<dyn MetadataStoreInterface>, MetadataError> {
			HttpMetadataStoreSchema
				.validate(config)
				.map_err(|e| MetadataError::Configuration(e.to_string()))?;

			let http_config: HttpMetadataStoreConfig = config.clone().try_into().map_err(|e| {
				MetadataError::Configuration(format!("Invalid http store config: {}", e))
			})?;

			Ok(Box::new(HttpMetadataStore::new(http_config)?))
		}
	}
}

impl MetadataStoreRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_schema_requires_token() {
		let config: toml::Value = toml::from_str("api_url = \"https://api.nft.storage\"").unwrap();
		assert!(HttpMetadataStoreSchema.validate(&config).is_err());
	}

	#[test]
	fn test_base_url_is_normalized() {
		let store = HttpMetadataStore::new(HttpMetadataStoreConfig {
			api_url: "https://api.nft.storage/".to_string(),
			api_token: SecretKey::from("token"),
			timeout_seconds: 30,
		})
		.unwrap();
		assert_eq!(store.api_url, "https://api.nft.storage");
	}
}
