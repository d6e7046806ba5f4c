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

/// A single transfer of either the native asset or a token
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferArgs {
    /// Sender
    pub from: Address,
    /// Recipient
    pub to: Address,
    /// Amount in the asset's base units
    pub amount: U256,
    /// Token contract, `None` for a native transfer
    pub contract: Option<Address>,
}

impl TransferArgs {
    /// Native asset transfer
    pub fn native(from: Address, to: Address, amount: U256) -> Self {
        Self {
            from,
            to,
            amount,
            contract: None,
        }
    }

    /// Token transfer through `contract`
    pub fn token(from: Address, to: Address, amount: U256, contract: Address) -> Self {
        Self {
            from,
            to,
            amount,
            contract: Some(contract),
        }
    }
}

/// One leg of a [`MultiTransferArgs`]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receiver {
    /// Recipient
    pub to: Address,
    /// Amount in the asset's base units
    pub amount: U256,
    /// Token contract, `None` for a native transfer
    pub contract: Option<Address>,
}

/// Several transfers from one account, optionally paid for by a separate fee payer
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiTransferArgs {
    /// Account whose funds move
    pub from: Address,
    /// Transfers, executed in order
    pub receivers: Vec<Receiver>,
    /// Account that pays gas and broadcasts
    pub fee_payer: Option<Address>,
}

impl MultiTransferArgs {
    /// Create a batch without a fee payer
    pub fn new(from: Address, receivers: Vec<Receiver>) -> Self {
        Self {
            from,
            receivers,
            fee_payer: None,
        }
    }

    /// Set the fee payer
    pub fn with_fee_payer(mut self, fee_payer: Address) -> Self {
        self.fee_payer = Some(fee_payer);
        self
    }

    /// Split the batch into individual transfers
    pub fn as_account_transfers(&self) -> Vec<TransferArgs> {
        self.receivers
            .iter()
            .map(|r| TransferArgs {
                from: self.from,
                to: r.to,
                amount: r.amount,
                contract: r.contract,
            })
            .collect()
    }
}

impl From<TransferArgs> for MultiTransferArgs {
    fn from(args: TransferArgs) -> Self {
        Self::new(
            args.from,
            vec![Receiver {
                to: args.to,
                amount: args.amount,
                contract: args.contract,
            }],
        )
    }
}
