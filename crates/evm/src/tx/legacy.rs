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

use alloy_consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy_primitives::TxKind;
use crosschain_types::{ChainSpec, SignatureRequest, SignatureResponse, TransferArgs, TxInput};

use super::{into_envelope, EvmTx, SingleSignature};
use crate::{payload::destination_amount_data, Result};

/// Pre EIP-2718 transaction with EIP-155 replay protection
#[derive(Clone, Debug)]
pub struct LegacyTx {
    body: TxLegacy,
    signature: SingleSignature,
}

impl LegacyTx {
    /// Build a transfer priced with the input's flat gas price
    pub fn new(args: &TransferArgs, input: &TxInput, chain: &ChainSpec) -> Self {
        let (to, value, data) = destination_amount_data(args);
        let body = TxLegacy {
            chain_id: Some(input.resolve_chain_id(chain)),
            nonce: input.nonce,
            gas_price: input.gas_price,
            gas_limit: input.gas_limit,
            to: TxKind::Call(to),
            value,
            input: data,
        };
        tracing::debug!("built legacy transaction {body:?}");
        Self {
            body,
            signature: SingleSignature::default(),
        }
    }

    /// Unsigned body
    pub fn body(&self) -> &TxLegacy {
        &self.body
    }
}

impl EvmTx for LegacyTx {
    fn sighashes(&self) -> Result<Vec<SignatureRequest>> {
        let sighash = self.body.signature_hash();
        tracing::trace!("transaction sighash {sighash}");
        Ok(vec![SignatureRequest::new(sighash)])
    }

    fn additional_sighashes(&self) -> Result<Vec<SignatureRequest>> {
        Ok(vec![])
    }

    fn add_signatures(&mut self, responses: &[SignatureResponse]) -> Result<()> {
        self.signature.add(responses)
    }

    fn is_signed(&self) -> bool {
        self.signature.is_signed()
    }

    fn envelope(&self) -> Result<TxEnvelope> {
        Ok(into_envelope(self.body.clone(), self.signature.get()))
    }
}
