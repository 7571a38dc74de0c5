//! EIP-712 authorization signatures for on-chain reward claims.
//!
//! The backend attests to a driver's verified statistics; the claim
//! contract recovers this signature and computes the payout itself,
//! so the signed message carries raw stats rather than a token
//! amount.

use alloy::{
    primitives::{Address, U256},
    signers::{local::PrivateKeySigner, Signer},
    sol,
    sol_types::{eip712_domain, Eip712Domain, SolStruct},
};

use crate::models::profile::DriverStats;

sol! {
    struct ClaimAuthorization {
        address wallet;
        uint256 iracingId;
        uint256 wins;
        uint256 top5s;
        uint256 starts;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("Invalid signer private key: {0}")]
    InvalidKey(String),
    #[error("Signing failed: {0}")]
    Signing(String),
}

pub type SignerResult<T> = Result<T, SignerError>;

#[derive(Debug, Clone)]
pub struct ClaimSigner {
    signer: PrivateKeySigner,
    domain: Eip712Domain,
}

impl ClaimSigner {
    pub fn new(
        private_key: &str,
        chain_id: u64,
        verifying_contract: Address,
    ) -> SignerResult<Self> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|e: alloy::signers::local::LocalSignerError| {
                SignerError::InvalidKey(e.to_string())
            })?;

        let domain = eip712_domain! {
            name: "HODL Racing Claim",
            version: "1",
            chain_id: chain_id,
            verifying_contract: verifying_contract,
        };

        Ok(Self { signer, domain })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Signs the typed claim authorization and returns the signature
    /// as a 0x-prefixed 65-byte hex string.
    pub async fn sign_claim(
        &self,
        wallet: Address,
        iracing_id: u64,
        stats: DriverStats,
    ) -> SignerResult<String> {
        let authorization = ClaimAuthorization {
            wallet,
            iracingId: U256::from(iracing_id),
            wins: U256::from(stats.wins),
            top5s: U256::from(stats.top5s),
            starts: U256::from(stats.starts),
        };

        let hash = authorization.eip712_signing_hash(&self.domain);
        let signature = self
            .signer
            .sign_hash(&hash)
            .await
            .map_err(|e| SignerError::Signing(e.to_string()))?;

        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}
