//! Voucher data model: payloads, signing domains, and signed vouchers.
//!
//! A voucher is a typed, signed record authorizing the future minting of one
//! token at a minimum price. The types here carry no signing logic of their
//! own; they know how to hash themselves for the typed-data signing scheme
//! and nothing else.

use crate::utils::{
	compute_domain_hash, compute_final_digest, with_0x_prefix, without_0x_prefix,
	Eip712AbiEncoder, NFT_VOUCHER_TYPE, SIGNING_DOMAIN_NAME, SIGNING_DOMAIN_VERSION,
};
use alloy_primitives::{keccak256, Address, B256, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// EIP-712 signing domain binding voucher signatures to one contract on one
/// chain, preventing replay across contracts and chains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningDomain {
	/// Domain name constant.
	pub name: String,
	/// Domain version constant.
	pub version: String,
	/// Chain the verifying contract is deployed on.
	pub chain_id: u64,
	/// Address of the contract that will verify voucher signatures.
	pub verifying_contract: Address,
}

impl SigningDomain {
	/// Builds the voucher signing domain for a contract on the given chain,
	/// using the fixed name and version constants.
	pub fn for_contract(chain_id: u64, verifying_contract: Address) -> Self {
		Self {
			name: SIGNING_DOMAIN_NAME.to_string(),
			version: SIGNING_DOMAIN_VERSION.to_string(),
			chain_id,
			verifying_contract,
		}
	}

	/// Computes the EIP-712 domain separator for this domain.
	pub fn separator(&self) -> B256 {
		compute_domain_hash(&self.name, &self.version, self.chain_id, &self.verifying_contract)
	}
}

/// The unsigned fields a creator commits to when issuing a voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherPayload {
	/// Id of the un-minted token. Opaque to the voucher layer; callers are
	/// responsible for not reusing ids.
	pub token_id: U256,
	/// Metadata URI associated with the token. Must be non-empty.
	pub uri: String,
	/// Minimum price in wei the creator will accept on redemption.
	#[serde(default)]
	pub min_price: U256,
}

impl VoucherPayload {
	/// Computes the EIP-712 struct hash over the `NFTVoucher` schema.
	pub fn struct_hash(&self) -> B256 {
		let type_hash = keccak256(NFT_VOUCHER_TYPE.as_bytes());
		let mut enc = Eip712AbiEncoder::new();
		enc.push_b256(&type_hash);
		enc.push_u256(self.token_id);
		enc.push_u256(self.min_price);
		enc.push_b256(&keccak256(self.uri.as_bytes()));
		keccak256(enc.finish())
	}
}

/// Computes the digest a signer must sign for `payload` under `domain`.
pub fn signing_digest(domain: &SigningDomain, payload: &VoucherPayload) -> B256 {
	compute_final_digest(&domain.separator(), &payload.struct_hash())
}

/// An opaque signature produced by a typed-data signing capability.
///
/// Stored as raw bytes (65-byte r || s || v for ECDSA signers) and
/// serialized as a 0x-prefixed hex string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(pub Vec<u8>);

impl fmt::Display for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", with_0x_prefix(&hex::encode(&self.0)))
	}
}

impl Serialize for Signature {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&with_0x_prefix(&hex::encode(&self.0)))
	}
}

impl<'de> Deserialize<'de> for Signature {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		hex::decode(without_0x_prefix(&s))
			.map(Signature)
			.map_err(serde::de::Error::custom)
	}
}

/// A voucher payload together with the signature authorizing its redemption.
///
/// This is the artifact handed back to callers; nothing here is persisted
/// and redemption happens in a contract call this crate never makes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedVoucher {
	/// The signed fields.
	#[serde(flatten)]
	pub payload: VoucherPayload,
	/// Signature over the payload's typed-data digest.
	pub signature: Signature,
}
