//! Signature verification for signed vouchers.
//!
//! Verifies vouchers the same way the redeeming contract does: recompute
//! the typed-data digest under the signing domain and recover the address
//! that produced the signature.

use crate::VoucherError;
use alloy_primitives::{Address, Signature as EcdsaSignature};
use minter_types::{signing_digest, SignedVoucher, SigningDomain};

/// Recovers the address that signed `voucher` under `domain`.
pub fn recover_signer(
	voucher: &SignedVoucher,
	domain: &SigningDomain,
) -> Result<Address, VoucherError> {
	let digest = signing_digest(domain, &voucher.payload);

	let signature = EcdsaSignature::try_from(voucher.signature.0.as_slice())
		.map_err(|e| VoucherError::InvalidSignature(e.to_string()))?;

	signature
		.recover_address_from_prehash(&digest)
		.map_err(|e| VoucherError::InvalidSignature(e.to_string()))
}

/// Checks whether `voucher` was signed by `expected` under `domain`.
pub fn verify_voucher(
	voucher: &SignedVoucher,
	domain: &SigningDomain,
	expected: &Address,
) -> Result<bool, VoucherError> {
	Ok(recover_signer(voucher, domain)? == *expected)
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::U256;
	use minter_types::{Signature, VoucherPayload};

	#[test]
	fn test_malformed_signature_rejected() {
		let domain = SigningDomain::for_contract(
			31337,
			"0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap(),
		);
		let voucher = SignedVoucher {
			payload: VoucherPayload {
				token_id: U256::from(1),
				uri: "ipfs://abc".to_string(),
				min_price: U256::ZERO,
			},
			signature: Signature(vec![0x00; 10]),
		};

		let err = recover_signer(&voucher, &domain).unwrap_err();
		assert!(matches!(err, VoucherError::InvalidSignature(_)));
	}
}
