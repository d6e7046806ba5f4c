// This file is part of Crosschain.
//
// Crosschain is free software: you can redistribute it and/or modify it under the
// terms of the GNU Lesser General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version.
//
// Crosschain is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with Crosschain.
// If not, see https://www.gnu.org/licenses/.

use std::{
    collections::HashMap,
    fmt::{self, Debug},
    sync::Arc,
};

use alloy_primitives::{Address, Signature, B256};
use crosschain_types::{SignatureRequest, SignatureResponse, SIGNATURE_LENGTH};
#[cfg(feature = "test-utils")]
use mockall::automock;

use crate::{Error, Result};

/// Signs prehashed digests with a single key
#[cfg_attr(feature = "test-utils", automock)]
#[async_trait::async_trait]
pub trait DigestSigner: Send + Sync {
    /// Address of the key
    fn address(&self) -> Address;

    /// Sign a 32 byte digest
    async fn sign_digest(&self, digest: &B256) -> Result<Signature>;
}

/// Raw `r || s || y_parity` form, with a y parity of 0 or 1
pub fn encode_signature(signature: &Signature) -> [u8; SIGNATURE_LENGTH] {
    let mut raw = [0_u8; SIGNATURE_LENGTH];
    raw[..32].copy_from_slice(&signature.r().to_be_bytes::<32>());
    raw[32..64].copy_from_slice(&signature.s().to_be_bytes::<32>());
    raw[64] = u8::from(signature.v());
    raw
}

/// Signers keyed by address.
///
/// Requests addressed to a signer go to that signer, the rest go to the default.
#[derive(Clone)]
pub struct SignerSet {
    default: Address,
    signers: HashMap<Address, Arc<dyn DigestSigner>>,
}

impl Debug for SignerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerSet")
            .field("default", &self.default)
            .field("signers", &self.addresses())
            .finish()
    }
}

impl SignerSet {
    /// Create a set with a default signer
    pub fn new(default: Arc<dyn DigestSigner>) -> Self {
        let address = default.address();
        Self {
            default: address,
            signers: HashMap::from([(address, default)]),
        }
    }

    /// Add a signer
    pub fn with_signer(mut self, signer: Arc<dyn DigestSigner>) -> Self {
        self.signers.insert(signer.address(), signer);
        self
    }

    /// Create a set from a list of signers, the first is the default
    pub fn from_signers(signers: Vec<Arc<dyn DigestSigner>>) -> Result<Self> {
        let mut signers = signers.into_iter();
        let default = signers
            .next()
            .ok_or_else(|| anyhow::anyhow!("at least one signer is required"))?;
        Ok(signers.fold(Self::new(default), Self::with_signer))
    }

    /// Address of the default signer
    pub fn default_address(&self) -> Address {
        self.default
    }

    /// Addresses of every signer
    pub fn addresses(&self) -> Vec<Address> {
        self.signers.keys().copied().collect()
    }

    /// Signer a request is routed to
    pub fn signer_for(&self, request: &SignatureRequest) -> Result<&Arc<dyn DigestSigner>> {
        let address = request.signer.unwrap_or(self.default);
        self.signers
            .get(&address)
            .ok_or(Error::UnknownSigner(address))
    }

    /// Sign a single request
    pub async fn sign(&self, request: &SignatureRequest) -> Result<SignatureResponse> {
        let signer = self.signer_for(request)?;
        let signature = signer.sign_digest(&request.payload).await?;
        tracing::debug!("signed {} with {:?}", request.payload, signer.address());
        Ok(SignatureResponse::new(encode_signature(&signature).to_vec())
            .with_signer(signer.address()))
    }

    /// Sign requests in order
    pub async fn sign_all(&self, requests: &[SignatureRequest]) -> Result<Vec<SignatureResponse>> {
        let mut responses = Vec::with_capacity(requests.len());
        for request in requests {
            responses.push(self.sign(request).await?);
        }
        Ok(responses)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, b256, U256};

    use super::*;

    const OWNER: Address = address!("0x00000000000000000000000000000000000000a1");
    const FEE_PAYER: Address = address!("0x00000000000000000000000000000000000000b2");
    const DIGEST: B256 =
        b256!("0x1111111111111111111111111111111111111111111111111111111111111111");

    fn mock_signer(address: Address, times: usize) -> MockDigestSigner {
        let mut signer = MockDigestSigner::new();
        signer.expect_address().return_const(address);
        signer
            .expect_sign_digest()
            .times(times)
            .returning(|_| Ok(Signature::new(U256::from(1), U256::from(2), true)));
        signer
    }

    #[test]
    fn test_encode_signature() {
        let raw = encode_signature(&Signature::new(U256::from(1), U256::from(2), true));
        assert_eq!(raw[31], 1);
        assert_eq!(raw[63], 2);
        assert_eq!(raw[64], 1);

        let raw = encode_signature(&Signature::new(U256::from(1), U256::from(2), false));
        assert_eq!(raw[64], 0);
    }

    #[tokio::test]
    async fn test_routes_to_required_signer() {
        let signers = SignerSet::new(Arc::new(mock_signer(OWNER, 0)))
            .with_signer(Arc::new(mock_signer(FEE_PAYER, 1)));

        let response = signers
            .sign(&SignatureRequest::for_signer(DIGEST, FEE_PAYER))
            .await
            .unwrap();
        assert_eq!(response.signer, Some(FEE_PAYER));
        assert_eq!(response.signature.len(), SIGNATURE_LENGTH);
    }

    #[tokio::test]
    async fn test_routes_to_default_signer() {
        let signers = SignerSet::new(Arc::new(mock_signer(OWNER, 2)))
            .with_signer(Arc::new(mock_signer(FEE_PAYER, 0)));

        let responses = signers
            .sign_all(&[SignatureRequest::new(DIGEST), SignatureRequest::new(DIGEST)])
            .await
            .unwrap();
        assert!(responses.iter().all(|r| r.signer == Some(OWNER)));
    }

    #[tokio::test]
    async fn test_unknown_signer() {
        let signers = SignerSet::new(Arc::new(mock_signer(OWNER, 0)));
        let result = signers
            .sign(&SignatureRequest::for_signer(DIGEST, FEE_PAYER))
            .await;
        assert!(matches!(result, Err(Error::UnknownSigner(a)) if a == FEE_PAYER));
    }

    #[tokio::test]
    async fn test_signing_failure_propagates() {
        let mut signer = MockDigestSigner::new();
        signer.expect_address().return_const(OWNER);
        signer
            .expect_sign_digest()
            .returning(|_| Err(Error::SigningError("device unavailable".to_string())));
        let signers = SignerSet::new(Arc::new(signer));

        assert!(matches!(
            signers.sign(&SignatureRequest::new(DIGEST)).await,
            Err(Error::SigningError(_))
        ));
    }

    #[test]
    fn test_from_signers_requires_one() {
        assert!(SignerSet::from_signers(vec![]).is_err());

        let signers = SignerSet::from_signers(vec![
            Arc::new(mock_signer(OWNER, 0)) as Arc<dyn DigestSigner>,
            Arc::new(mock_signer(FEE_PAYER, 0)),
        ])
        .unwrap();
        assert_eq!(signers.default_address(), OWNER);
        assert_eq!(signers.addresses().len(), 2);
    }
}
