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

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{
    chain::ChainSpec,
    gas::{self, GasFees},
};

/// Network-derived parameters a transaction is built from.
///
/// Values are trusted verbatim, nothing here is validated against the chain.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxInput {
    /// Sender nonce
    pub nonce: u64,
    /// Sender the nonce was fetched for
    pub from_address: Address,
    /// Gas limit
    pub gas_limit: u64,
    /// EIP-1559 max priority fee per gas
    pub gas_tip_cap: u128,
    /// EIP-1559 max fee per gas
    pub gas_fee_cap: u128,
    /// Extra L1 data fee charged on rollups
    pub l1_fee: U256,
    /// Flat gas price, legacy transactions only
    pub gas_price: u128,
    /// Chain id, 0 means "use the chain spec's"
    pub chain_id: u64,
    /// Replay nonce kept by the smart account contract
    pub smart_account_nonce: u64,
    /// Account paying gas for a delegated batch
    pub fee_payer_address: Option<Address>,
    /// Fee payer nonce
    pub fee_payer_nonce: u64,
}

impl TxInput {
    /// The chain id to sign for
    pub fn resolve_chain_id(&self, chain: &ChainSpec) -> u64 {
        if self.chain_id == 0 {
            chain.id
        } else {
            self.chain_id
        }
    }

    /// Dynamic fee caps
    pub fn gas_fees(&self) -> GasFees {
        GasFees {
            max_fee_per_gas: self.gas_fee_cap,
            max_priority_fee_per_gas: self.gas_tip_cap,
        }
    }

    /// Scale all fee fields to `percent` percent, e.g. 150 for 1.5x.
    pub fn apply_fee_multiplier_percent(&mut self, percent: u32) {
        let fees = self.gas_fees().scale_by_percent(percent);
        self.gas_tip_cap = fees.max_priority_fee_per_gas;
        self.gas_fee_cap = fees.max_fee_per_gas;
        self.gas_price = gas::scale(self.gas_price, percent);
    }

    /// Most this transaction can spend on fees
    pub fn fee_limit(&self) -> U256 {
        let max_price = self.gas_price.max(self.gas_fee_cap);
        U256::from(max_price) * U256::from(self.gas_limit) + self.l1_fee
    }

    /// Whether a transaction built from `other` could land alongside one built from this input.
    pub fn independent_of(&self, other: &TxInput) -> bool {
        if self.fee_payer_address.is_some() || self.fee_payer_nonce != 0 {
            if other.nonce == self.nonce && other.from_address == self.from_address {
                return false;
            }
            // never sign twice for the same fee payer nonce
            if other.fee_payer_address == self.fee_payer_address
                && other.fee_payer_nonce == self.fee_payer_nonce
            {
                return false;
            }
            true
        } else {
            other.nonce != self.nonce
        }
    }

    /// Whether re-signing with `self` after `other` was broadcast can't double spend
    pub fn safe_from_double_send(&self, other: &TxInput) -> bool {
        !self.independent_of(other)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    fn input() -> TxInput {
        TxInput {
            nonce: 7,
            from_address: address!("0x00000000000000000000000000000000000000a1"),
            gas_limit: 21_000,
            gas_tip_cap: 2,
            gas_fee_cap: 100,
            gas_price: 50,
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_chain_id() {
        let spec = ChainSpec {
            id: 10,
            ..Default::default()
        };
        assert_eq!(input().resolve_chain_id(&spec), 10);
        let input = TxInput {
            chain_id: 5,
            ..input()
        };
        assert_eq!(input.resolve_chain_id(&spec), 5);
    }

    #[test]
    fn test_apply_fee_multiplier() {
        let mut input = input();
        input.apply_fee_multiplier_percent(200);
        assert_eq!(input.gas_tip_cap, 4);
        assert_eq!(input.gas_fee_cap, 200);
        assert_eq!(input.gas_price, 100);
    }

    #[test]
    fn test_fee_limit() {
        let input = TxInput {
            l1_fee: U256::from(5),
            ..input()
        };
        assert_eq!(input.fee_limit(), U256::from(100 * 21_000 + 5));
    }

    #[test]
    fn test_independent_by_nonce() {
        let a = input();
        let b = TxInput { nonce: 8, ..input() };
        assert!(a.independent_of(&b));
        assert!(!a.independent_of(&a.clone()));
        assert!(a.safe_from_double_send(&a.clone()));
    }

    #[test]
    fn test_fee_payer_nonce_reuse_is_not_independent() {
        let fee_payer = address!("0x00000000000000000000000000000000000000fe");
        let a = TxInput {
            fee_payer_address: Some(fee_payer),
            fee_payer_nonce: 3,
            ..input()
        };
        let b = TxInput { nonce: 8, ..a.clone() };
        assert!(!a.independent_of(&b));

        let c = TxInput {
            fee_payer_nonce: 4,
            ..b
        };
        assert!(a.independent_of(&c));
    }
}
