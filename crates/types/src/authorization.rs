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

//! 7702 authorization tuple support.

use alloy_eips::eip7702::SignedAuthorization;
use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_rlp::{Encodable, Header};
use serde::{Deserialize, Serialize};

use crate::SIGNATURE_LENGTH;

/// Leading byte of an authorization signing payload. Keeps the digest domain
/// apart from every transaction type's signing digest.
pub const AUTHORIZATION_MAGIC: u8 = 0x05;

/// Unsigned 7702 authorization tuple.
///
/// Attaching a signature consumes the tuple, so a signed authorization can't be
/// edited afterwards. Build a fresh tuple to change any field.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    /// The chain ID of the authorization.
    pub chain_id: U256,
    /// The contract whose code the authority delegates to.
    pub delegate_address: Address,
    /// The authority's nonce at the point the authorization is applied.
    pub authority_nonce: u64,
}

impl Authorization {
    /// Create an unsigned authorization tuple.
    pub fn new(chain_id: U256, delegate_address: Address, authority_nonce: u64) -> Self {
        Self {
            chain_id,
            delegate_address,
            authority_nonce,
        }
    }

    /// Digest the authority signs: `keccak256(0x05 || rlp([chain_id, address, nonce]))`.
    pub fn sighash(&self) -> B256 {
        let payload_length = self.chain_id.length()
            + self.delegate_address.length()
            + self.authority_nonce.length();
        let header = Header {
            list: true,
            payload_length,
        };

        let mut buf = Vec::with_capacity(1 + header.length() + payload_length);
        buf.push(AUTHORIZATION_MAGIC);
        header.encode(&mut buf);
        self.chain_id.encode(&mut buf);
        self.delegate_address.encode(&mut buf);
        self.authority_nonce.encode(&mut buf);

        keccak256(&buf)
    }

    /// Attach a raw `r || s || v` signature.
    ///
    /// `v` is kept exactly as supplied, normalizing the recovery id is up to the signer.
    pub fn set_signature(self, signature: &[u8; SIGNATURE_LENGTH]) -> SignedAuthorization {
        let r = U256::from_be_slice(&signature[..32]);
        let s = U256::from_be_slice(&signature[32..64]);
        SignedAuthorization::new_unchecked(self.into(), signature[64], r, s)
    }
}

impl From<Authorization> for alloy_eips::eip7702::Authorization {
    fn from(value: Authorization) -> Self {
        alloy_eips::eip7702::Authorization {
            chain_id: value.chain_id,
            address: value.delegate_address,
            nonce: value.authority_nonce,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    fn authorization(nonce: u64) -> Authorization {
        Authorization::new(
            U256::from(1),
            address!("0x0000000000000000000000000000000000000002"),
            nonce,
        )
    }

    #[test]
    fn test_sighash_deterministic() {
        assert_eq!(authorization(5).sighash(), authorization(5).sighash());
    }

    #[test]
    fn test_sighash_depends_on_nonce() {
        assert_ne!(authorization(5).sighash(), authorization(6).sighash());
    }

    #[test]
    fn test_sighash_matches_eip7702_signature_hash() {
        let auth = authorization(5);
        let upstream: alloy_eips::eip7702::Authorization = auth.into();
        assert_eq!(auth.sighash(), upstream.signature_hash());

        let large = Authorization::new(U256::MAX, Address::repeat_byte(0xf), u64::MAX);
        let upstream: alloy_eips::eip7702::Authorization = large.into();
        assert_eq!(large.sighash(), upstream.signature_hash());
    }

    #[test]
    fn test_set_signature_splits_raw_bytes() {
        let mut raw = [0_u8; SIGNATURE_LENGTH];
        raw[..32].fill(0x11);
        raw[32..64].fill(0x22);
        raw[64] = 28;

        let signed = authorization(5).set_signature(&raw);
        assert_eq!(signed.r(), U256::from_be_bytes([0x11; 32]));
        assert_eq!(signed.s(), U256::from_be_bytes([0x22; 32]));
        // recovery id is not normalized
        assert_eq!(signed.y_parity(), 28);
        assert_eq!(signed.nonce, 5);
        assert_eq!(
            signed.address,
            address!("0x0000000000000000000000000000000000000002")
        );
    }
}
