//! NFT content records and content-addressed URIs.

use serde::{Deserialize, Serialize};
use std::fmt;

const IPFS_SCHEME: &str = "ipfs://";

/// A URI returned by a content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentUri(String);

impl ContentUri {
	pub fn new(uri: impl Into<String>) -> Self {
		Self(uri.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns true if the URI uses the `ipfs://` scheme.
	pub fn is_ipfs(&self) -> bool {
		self.0.starts_with(IPFS_SCHEME)
	}

	/// Returns the URI without its `ipfs://` scheme. Contracts that prefix
	/// token URIs themselves take this form instead of the full URI.
	pub fn ipfs_path(&self) -> &str {
		self.0.strip_prefix(IPFS_SCHEME).unwrap_or(&self.0)
	}
}

impl fmt::Display for ContentUri {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<String> for ContentUri {
	fn from(uri: String) -> Self {
		Self(uri)
	}
}

impl From<&str> for ContentUri {
	fn from(uri: &str) -> Self {
		Self(uri.to_string())
	}
}

/// The metadata record uploaded alongside an image.
///
/// Serializes to the conventional NFT metadata JSON shape, with `image`
/// carrying the content URI of the uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadata {
	/// Display name. Must be non-empty.
	pub name: String,
	/// Free-form description.
	pub description: String,
	/// Content URI of the image.
	pub image: ContentUri,
}
