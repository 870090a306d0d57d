//! Zeroizing wrapper for secret material.
//!
//! Private keys and API tokens pass through configuration as strings; this
//! wrapper zeroes them on drop and keeps them out of logs, debug output,
//! and serialized config.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

/// A secret string that is zeroed on drop and redacted everywhere it could
/// otherwise leak.
#[derive(Clone)]
pub struct SecretKey(Zeroizing<String>);

impl SecretKey {
	pub fn new(secret: String) -> Self {
		Self(Zeroizing::new(secret))
	}

	/// Exposes the raw secret. Callers must not log or store the value.
	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for SecretKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SecretKey(***REDACTED***)")
	}
}

impl fmt::Display for SecretKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "***REDACTED***")
	}
}

impl From<String> for SecretKey {
	fn from(secret: String) -> Self {
		Self::new(secret)
	}
}

impl From<&str> for SecretKey {
	fn from(secret: &str) -> Self {
		Self::new(secret.to_string())
	}
}

impl Serialize for SecretKey {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("***REDACTED***")
	}
}

impl<'de> Deserialize<'de> for SecretKey {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Ok(SecretKey::new(s))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_debug_and_display_redact() {
		let secret = SecretKey::from("0xdeadbeef");
		assert_eq!(format!("{:?}", secret), "SecretKey(***REDACTED***)");
		assert_eq!(format!("{}", secret), "***REDACTED***");
	}

	#[test]
	fn test_expose_returns_raw_value() {
		let secret = SecretKey::from("0xdeadbeef");
		assert_eq!(secret.expose(), "0xdeadbeef");
	}
}
