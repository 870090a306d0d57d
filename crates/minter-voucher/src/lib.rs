//! Voucher construction module for the lazymint workspace.
//!
//! Builds signed NFT vouchers: typed records binding a token id, a metadata
//! URI, and a minimum price to one verifying contract on one chain. The
//! builder resolves its signing domain once, delegates signing to an
//! injected signer, and hands the finished voucher back. Redemption is a
//! contract call made by other parties; nothing here touches the chain
//! beyond the initial chain-id query.

use alloy_primitives::U256;
use minter_contract::ContractService;
use minter_signer::SignerService;
use minter_types::{signing_digest, SignedVoucher, SigningDomain, VoucherPayload};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;

pub mod verify;

/// Errors that can occur while building or verifying vouchers.
#[derive(Debug, Error)]
pub enum VoucherError {
	/// The chain-id query against the bound contract failed. Nothing was
	/// cached; the next domain resolution retries the query.
	#[error("Domain resolution failed: {0}")]
	DomainResolution(String),
	/// The signer refused or failed to sign the voucher digest.
	#[error("Signing failed: {0}")]
	Signing(String),
	/// The voucher URI was empty.
	#[error("Voucher URI cannot be empty")]
	EmptyUri,
	/// The signature bytes could not be interpreted.
	#[error("Invalid signature: {0}")]
	InvalidSignature(String),
}

/// Builds signed vouchers for one contract with one signer identity.
///
/// The signing domain is resolved on first use and cached for the
/// builder's lifetime; callers that need a fresh domain create a new
/// builder. A builder holds no other state: vouchers are not cached and
/// token-id uniqueness is the caller's responsibility.
pub struct VoucherBuilder {
	/// Binding to the verifying contract vouchers commit to.
	contract: Arc<ContractService>,
	/// Signing capability bound to the creator identity.
	signer: Arc<SignerService>,
	/// Domain cache, populated by the first successful resolution.
	domain: OnceCell<SigningDomain>,
}

impl VoucherBuilder {
	/// Creates a builder over the given contract binding and signer.
	pub fn new(contract: Arc<ContractService>, signer: Arc<SignerService>) -> Self {
		Self {
			contract,
			signer,
			domain: OnceCell::new(),
		}
	}

	/// Returns the signing domain, resolving and caching it on first use.
	///
	/// The chain id is queried from the bound contract at most once; a
	/// failed query caches nothing, so the next call retries instead of
	/// reusing a partial result.
	pub async fn signing_domain(&self) -> Result<&SigningDomain, VoucherError> {
		self.domain
			.get_or_try_init(|| async {
				let chain_id = self
					.contract
					.chain_id()
					.await
					.map_err(|e| VoucherError::DomainResolution(e.to_string()))?;
				let domain = SigningDomain::for_contract(chain_id, self.contract.address());
				tracing::debug!(
					chain_id,
					contract = %domain.verifying_contract,
					"Resolved voucher signing domain"
				);
				Ok(domain)
			})
			.await
	}

	/// Creates a signed voucher for `token_id` at `uri`.
	///
	/// `min_price` is the minimum price in wei the creator will accept on
	/// redemption; `None` means free. The voucher is signed over the
	/// `NFTVoucher` typed-data schema under this builder's signing domain.
	/// Signing failures surface as [`VoucherError::Signing`] with no retry;
	/// the caller decides whether to try again.
	pub async fn create_voucher(
		&self,
		token_id: U256,
		uri: impl Into<String>,
		min_price: Option<U256>,
	) -> Result<SignedVoucher, VoucherError> {
		let uri = uri.into();
		if uri.is_empty() {
			return Err(VoucherError::EmptyUri);
		}

		let payload = VoucherPayload {
			token_id,
			uri,
			min_price: min_price.unwrap_or(U256::ZERO),
		};

		let domain = self.signing_domain().await?;
		let digest = signing_digest(domain, &payload);

		let signature = self
			.signer
			.sign_digest(&digest)
			.await
			.map_err(|e| VoucherError::Signing(e.to_string()))?;

		Ok(SignedVoucher { payload, signature })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::verify::{recover_signer, verify_voucher};
	use alloy_primitives::{Address, B256};
	use async_trait::async_trait;
	use minter_contract::{ContractError, ContractInterface};
	use minter_signer::implementations::local::LocalSigner;
	use minter_signer::{SignerError, SignerInterface};
	use minter_types::{
		ConfigSchema, SecretKey, Signature, ValidationError, SIGNING_DOMAIN_NAME,
		SIGNING_DOMAIN_VERSION,
	};
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Arc;

	// Well-known anvil development key
	const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
	const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

	fn contract_address() -> Address {
		"0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap()
	}

	fn signer_address() -> Address {
		TEST_ADDRESS.parse().unwrap()
	}

	struct NullSchema;

	impl ConfigSchema for NullSchema {
		fn validate(&self, _config: &toml::Value) -> Result<(), ValidationError> {
			Ok(())
		}
	}

	/// Contract binding that counts chain-id queries and can fail the
	/// first N of them.
	struct CountingContract {
		address: Address,
		chain_id: u64,
		queries: Arc<AtomicUsize>,
		failures_remaining: Arc<AtomicUsize>,
	}

	impl CountingContract {
		fn new(chain_id: u64, queries: Arc<AtomicUsize>) -> Self {
			Self::failing_first(chain_id, 0, queries)
		}

		fn failing_first(chain_id: u64, failures: usize, queries: Arc<AtomicUsize>) -> Self {
			Self {
				address: contract_address(),
				chain_id,
				queries,
				failures_remaining: Arc::new(AtomicUsize::new(failures)),
			}
		}
	}

	#[async_trait]
	impl ContractInterface for CountingContract {
		fn config_schema(&self) -> Box<dyn ConfigSchema> {
			Box::new(NullSchema)
		}

		fn address(&self) -> Address {
			self.address
		}

		async fn chain_id(&self) -> Result<u64, ContractError> {
			self.queries.fetch_add(1, Ordering::SeqCst);
			let remaining = self.failures_remaining.load(Ordering::SeqCst);
			if remaining > 0 {
				self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
				return Err(ContractError::Network("chain id unavailable".to_string()));
			}
			Ok(self.chain_id)
		}
	}

	/// Signer that refuses every request.
	struct RejectingSigner;

	#[async_trait]
	impl SignerInterface for RejectingSigner {
		fn config_schema(&self) -> Box<dyn ConfigSchema> {
			Box::new(NullSchema)
		}

		async fn address(&self) -> Result<Address, SignerError> {
			Ok(Address::ZERO)
		}

		async fn sign_digest(&self, _digest: &B256) -> Result<Signature, SignerError> {
			Err(SignerError::SigningFailed("user rejected the request".to_string()))
		}
	}

	fn builder_with(
		contract: CountingContract,
		signer: impl SignerInterface + 'static,
	) -> VoucherBuilder {
		VoucherBuilder::new(
			Arc::new(ContractService::new(Box::new(contract))),
			Arc::new(SignerService::new(Box::new(signer))),
		)
	}

	fn local_signer() -> LocalSigner {
		LocalSigner::new(&SecretKey::from(TEST_KEY)).unwrap()
	}

	#[tokio::test]
	async fn test_signing_domain_is_cached() {
		let queries = Arc::new(AtomicUsize::new(0));
		let builder = builder_with(
			CountingContract::new(31337, queries.clone()),
			local_signer(),
		);

		let first = builder.signing_domain().await.unwrap().clone();
		let second = builder.signing_domain().await.unwrap().clone();

		assert_eq!(first, second);
		assert_eq!(first.name, SIGNING_DOMAIN_NAME);
		assert_eq!(first.version, SIGNING_DOMAIN_VERSION);
		assert_eq!(first.chain_id, 31337);
		assert_eq!(first.verifying_contract, contract_address());
		assert_eq!(queries.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn test_failed_chain_id_query_is_retried() {
		let queries = Arc::new(AtomicUsize::new(0));
		let builder = builder_with(
			CountingContract::failing_first(31337, 1, queries.clone()),
			local_signer(),
		);

		let err = builder.signing_domain().await.unwrap_err();
		assert!(matches!(err, VoucherError::DomainResolution(_)));
		assert_eq!(queries.load(Ordering::SeqCst), 1);

		// The failure cached nothing: the next call queries again and succeeds.
		let domain = builder.signing_domain().await.unwrap();
		assert_eq!(domain.chain_id, 31337);
		assert_eq!(queries.load(Ordering::SeqCst), 2);

		// And the success is cached.
		builder.signing_domain().await.unwrap();
		assert_eq!(queries.load(Ordering::SeqCst), 2);
	}

	#[tokio::test]
	async fn test_default_min_price_is_zero() {
		let queries = Arc::new(AtomicUsize::new(0));
		let builder = builder_with(CountingContract::new(31337, queries), local_signer());

		let voucher = builder
			.create_voucher(U256::from(5), "ipfs://abc", None)
			.await
			.unwrap();

		assert_eq!(voucher.payload.token_id, U256::from(5));
		assert_eq!(voucher.payload.uri, "ipfs://abc");
		assert_eq!(voucher.payload.min_price, U256::ZERO);
	}

	#[tokio::test]
	async fn test_vouchers_verify_against_cached_domain() {
		let queries = Arc::new(AtomicUsize::new(0));
		let builder = builder_with(
			CountingContract::new(31337, queries.clone()),
			local_signer(),
		);

		let first = builder
			.create_voucher(U256::from(7), "ipfs://abc", Some(U256::from(1000)))
			.await
			.unwrap();
		let second = builder
			.create_voucher(U256::from(7), "ipfs://abc", Some(U256::from(1000)))
			.await
			.unwrap();

		let domain = builder.signing_domain().await.unwrap().clone();
		assert_eq!(queries.load(Ordering::SeqCst), 1);

		assert_eq!(first.payload, second.payload);
		assert!(verify_voucher(&first, &domain, &signer_address()).unwrap());
		assert!(verify_voucher(&second, &domain, &signer_address()).unwrap());
	}

	#[tokio::test]
	async fn test_signer_rejection_surfaces() {
		let queries = Arc::new(AtomicUsize::new(0));
		let builder = builder_with(CountingContract::new(31337, queries), RejectingSigner);

		let err = builder
			.create_voucher(U256::from(1), "ipfs://abc", None)
			.await
			.unwrap_err();

		assert!(matches!(err, VoucherError::Signing(_)));
	}

	#[tokio::test]
	async fn test_empty_uri_rejected() {
		let queries = Arc::new(AtomicUsize::new(0));
		let builder = builder_with(
			CountingContract::new(31337, queries.clone()),
			local_signer(),
		);

		let err = builder.create_voucher(U256::from(1), "", None).await.unwrap_err();
		assert!(matches!(err, VoucherError::EmptyUri));
		// Rejected before any domain resolution happened.
		assert_eq!(queries.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn test_recovered_signer_matches() {
		let queries = Arc::new(AtomicUsize::new(0));
		let builder = builder_with(CountingContract::new(31337, queries), local_signer());

		let voucher = builder
			.create_voucher(U256::from(42), "ipfs://abc", Some(U256::from(1)))
			.await
			.unwrap();
		let domain = builder.signing_domain().await.unwrap().clone();

		assert_eq!(recover_signer(&voucher, &domain).unwrap(), signer_address());
		assert!(!verify_voucher(&voucher, &domain, &Address::ZERO).unwrap());
	}

	#[tokio::test]
	async fn test_signature_is_bound_to_domain() {
		let queries = Arc::new(AtomicUsize::new(0));
		let builder = builder_with(CountingContract::new(31337, queries), local_signer());

		let voucher = builder
			.create_voucher(U256::from(42), "ipfs://abc", None)
			.await
			.unwrap();

		// Verifying under a different chain's domain must not yield the signer.
		let foreign_domain = SigningDomain::for_contract(1, contract_address());
		match recover_signer(&voucher, &foreign_domain) {
			Ok(recovered) => assert_ne!(recovered, signer_address()),
			Err(VoucherError::InvalidSignature(_)) => {},
			Err(other) => panic!("unexpected error: {}", other),
		}
	}
}
