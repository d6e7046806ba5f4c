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

//! Smart account call batches and the digests the smart account verifies.

use alloy_primitives::{Address, Bytes, Keccak256, B256, U256};
use alloy_sol_types::SolCall;
use crosschain_contracts::basic_smart_account::IBasicSmartAccount;
use crosschain_types::chain::SmartAccountConfig;

use crate::signature::{self, RawSignature};

/// Fixed size of a packed call, excluding its data
pub const PACKED_CALL_HEADER_SIZE: usize = 20 + 32 + 32;

/// A call the smart account makes on the account owner's behalf
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SmartAccountCall {
    /// Call target
    pub to: Address,
    /// Value sent with the call
    pub value: U256,
    /// Calldata
    pub data: Bytes,
}

/// Tightly pack a call batch.
///
/// Each call is `to (20) || value (32) || len(data) (32) || data`, calls follow each
/// other with no padding. This is not ABI encoding.
pub fn pack_calls(calls: &[SmartAccountCall]) -> Vec<u8> {
    let size = calls
        .iter()
        .map(|call| PACKED_CALL_HEADER_SIZE + call.data.len())
        .sum();
    let mut packed = Vec::with_capacity(size);
    for call in calls {
        packed.extend_from_slice(call.to.as_slice());
        packed.extend_from_slice(&call.value.to_be_bytes::<32>());
        packed.extend_from_slice(&U256::from(call.data.len()).to_be_bytes::<32>());
        packed.extend_from_slice(&call.data);
    }
    packed
}

/// Domain separator binding a batch signature to `account` on `chain_id`
pub fn domain_separator(config: &SmartAccountConfig, chain_id: U256, account: Address) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(config.domain_typehash);
    hasher.update(chain_id.to_be_bytes::<32>());
    hasher.update([0_u8; 12]);
    hasher.update(account);
    hasher.finalize()
}

/// Struct hash over the packed calls and the smart account's replay nonce
pub fn handle_ops_struct_hash(config: &SmartAccountConfig, packed_calls: &[u8], nonce: U256) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(config.handle_ops_typehash);
    hasher.update(alloy_primitives::keccak256(packed_calls));
    hasher.update(nonce.to_be_bytes::<32>());
    hasher.finalize()
}

/// Digest the account owner signs to authorize a call batch
pub fn handle_ops_digest(
    config: &SmartAccountConfig,
    chain_id: U256,
    account: Address,
    packed_calls: &[u8],
    nonce: U256,
) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update([0x19, 0x01]);
    hasher.update(domain_separator(config, chain_id, account));
    hasher.update(handle_ops_struct_hash(config, packed_calls, nonce));
    let digest = hasher.finalize();
    tracing::trace!("handleOps digest for {account:?}: {digest}");
    digest
}

/// `handleOps(packed_calls, r, vs)` calldata carrying the owner's batch signature
pub(crate) fn handle_ops_calldata(packed_calls: Vec<u8>, signature: &RawSignature) -> Bytes {
    let (r, vs) = signature::compact(signature);
    IBasicSmartAccount::handleOpsCall {
        userOps: packed_calls.into(),
        r,
        vs,
    }
    .abi_encode()
    .into()
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, bytes};
    use alloy_sol_types::Eip712Domain;

    use super::*;

    fn calls() -> Vec<SmartAccountCall> {
        vec![
            SmartAccountCall {
                to: address!("0x00000000000000000000000000000000000000a1"),
                value: U256::from(1_000),
                data: Bytes::new(),
            },
            SmartAccountCall {
                to: address!("0x00000000000000000000000000000000000000b2"),
                value: U256::ZERO,
                data: bytes!("deadbeef"),
            },
        ]
    }

    #[test]
    fn test_pack_single_empty_call() {
        let packed = pack_calls(&[SmartAccountCall {
            to: address!("0x0000000000000000000000000000000000000001"),
            value: U256::ZERO,
            data: Bytes::new(),
        }]);

        assert_eq!(packed.len(), 84);
        let mut expected = [0_u8; 84];
        expected[19] = 1;
        assert_eq!(packed, expected);
    }

    #[test]
    fn test_pack_concatenates_without_padding() {
        let packed = pack_calls(&calls());
        assert_eq!(packed.len(), 2 * PACKED_CALL_HEADER_SIZE + 4);

        let first = &packed[..PACKED_CALL_HEADER_SIZE];
        assert_eq!(&first[..20], calls()[0].to.as_slice());
        assert_eq!(U256::from_be_slice(&first[20..52]), U256::from(1_000));
        assert_eq!(U256::from_be_slice(&first[52..84]), U256::ZERO);

        let second = &packed[PACKED_CALL_HEADER_SIZE..];
        assert_eq!(&second[..20], calls()[1].to.as_slice());
        assert_eq!(U256::from_be_slice(&second[52..84]), U256::from(4));
        assert_eq!(&second[84..], &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_digest_deterministic() {
        let config = SmartAccountConfig::default();
        let account = address!("0x00000000000000000000000000000000000000cc");
        let digest = |calls: &[SmartAccountCall]| {
            handle_ops_digest(&config, U256::from(1), account, &pack_calls(calls), U256::from(3))
        };

        assert_eq!(digest(&calls()), digest(&calls()));
        assert_ne!(digest(&calls()), digest(&calls()[..1]));
    }

    #[test]
    fn test_digest_bound_to_chain_and_nonce() {
        let config = SmartAccountConfig::default();
        let account = address!("0x00000000000000000000000000000000000000cc");
        let packed = pack_calls(&calls());
        let base = handle_ops_digest(&config, U256::from(1), account, &packed, U256::ZERO);

        assert_ne!(
            base,
            handle_ops_digest(&config, U256::from(2), account, &packed, U256::ZERO)
        );
        assert_ne!(
            base,
            handle_ops_digest(&config, U256::from(1), account, &packed, U256::from(1))
        );
    }

    #[test]
    fn test_domain_separator_matches_eip712() {
        let config = SmartAccountConfig::default();
        let account = address!("0x00000000000000000000000000000000000000cc");
        let domain = Eip712Domain::new(None, None, Some(U256::from(137)), Some(account), None);

        assert_eq!(
            domain_separator(&config, U256::from(137), account),
            domain.separator()
        );
    }

    #[test]
    fn test_handle_ops_selector() {
        assert_eq!(
            IBasicSmartAccount::handleOpsCall::SELECTOR,
            [0x74, 0xfa, 0x41, 0x21]
        );
    }

    #[test]
    fn test_handle_ops_calldata_layout() {
        let packed = pack_calls(&calls());
        let mut signature = [0_u8; 65];
        signature[..32].fill(0x11);
        signature[32..64].fill(0x22);
        signature[64] = 1;

        let calldata = handle_ops_calldata(packed.clone(), &signature);

        let mut vs = [0x22_u8; 32];
        vs[0] = 0xa2;
        let mut padded = packed.clone();
        padded.resize(packed.len().div_ceil(32) * 32, 0);

        let mut expected = IBasicSmartAccount::handleOpsCall::SELECTOR.to_vec();
        expected.extend_from_slice(&U256::from(96).to_be_bytes::<32>());
        expected.extend_from_slice(&[0x11; 32]);
        expected.extend_from_slice(&vs);
        expected.extend_from_slice(&U256::from(packed.len()).to_be_bytes::<32>());
        expected.extend_from_slice(&padded);

        assert_eq!(calldata.as_ref(), expected.as_slice());
    }
}
