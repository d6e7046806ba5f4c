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

//! Chain specification for Crosschain EVM transactions

use alloy_primitives::{address, b256, Address, B256};
use serde::{Deserialize, Serialize};

/// Deployed BasicSmartAccount contract.
pub const BASIC_SMART_ACCOUNT_ADDRESS: Address =
    address!("0xf457383ef5af8d5ffdd065cc2cb7a734304b2f90");

/// `keccak256("EIP712Domain(uint256 chainId,address verifyingContract)")`
pub const DOMAIN_TYPEHASH: B256 =
    b256!("0x47e79534a245952e8b16893a336b85a3d9ea9fa8c573f3d803afb92a79469218");

/// Struct typehash the BasicSmartAccount checks `handleOps` signatures against.
pub const HANDLEOPS_TYPEHASH: B256 =
    b256!("0x4f8bb4631e6552ac29b9d6bacf60ff8b5481e2af7c2104fe0261045fa6988111");

/// Chain specification
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChainSpec {
    /// name for logging purposes, e.g. "Ethereum", no logic is performed on this
    pub name: String,
    /// chain id, used when a transaction input doesn't carry one
    pub id: u64,
    /// Delegate written into the authorization of single-call delegation
    /// transactions. The zero address clears any code delegated to the account.
    pub no_delegation_address: Address,
    /// Smart account used for fee-payer batches
    pub smart_account: SmartAccountConfig,
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self {
            name: "Ethereum".to_string(),
            id: 1,
            no_delegation_address: Address::ZERO,
            smart_account: SmartAccountConfig::default(),
        }
    }
}

/// Smart account contract a fee-payer batch is executed through.
///
/// The typehashes are bound to the deployed contract's ABI. Signatures over
/// digests built with any other values are rejected on-chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmartAccountConfig {
    /// Contract code accounts delegate to
    pub address: Address,
    /// EIP-712 domain typehash
    pub domain_typehash: B256,
    /// `handleOps` struct typehash
    pub handle_ops_typehash: B256,
}

impl Default for SmartAccountConfig {
    fn default() -> Self {
        Self {
            address: BASIC_SMART_ACCOUNT_ADDRESS,
            domain_typehash: DOMAIN_TYPEHASH,
            handle_ops_typehash: HANDLEOPS_TYPEHASH,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::keccak256;

    use super::*;

    #[test]
    fn test_domain_typehash() {
        assert_eq!(
            keccak256("EIP712Domain(uint256 chainId,address verifyingContract)"),
            DOMAIN_TYPEHASH
        );
    }

    #[test]
    fn test_partial_spec_uses_defaults() {
        let spec: ChainSpec = serde_json::from_str(
            r#"{
                "name": "Sepolia",
                "id": 11155111,
                "smartAccount": {
                    "address": "0x00000000000000000000000000000000000000aa"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(spec.id, 11155111);
        assert_eq!(spec.no_delegation_address, Address::ZERO);
        assert_eq!(
            spec.smart_account.address,
            address!("0x00000000000000000000000000000000000000aa")
        );
        assert_eq!(spec.smart_account.domain_typehash, DOMAIN_TYPEHASH);
        assert_eq!(spec.smart_account.handle_ops_typehash, HANDLEOPS_TYPEHASH);
    }
}
