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

use alloy_consensus::{
    SignableTransaction, TxEip1559, TxEip2930, TxEip7702, TxEnvelope, TxLegacy, TypedTransaction,
};
use alloy_primitives::{Bytes, TxKind};
use crosschain_types::{ChainSpec, SignatureRequest, SignatureResponse, TransferArgs, TxInput};

use super::{into_envelope, EvmTx, SingleSignature};
use crate::{payload::destination_amount_data, Error, Result};

#[derive(Clone, Debug)]
enum CustomBody {
    Legacy(TxLegacy),
    Eip2930(TxEip2930),
    Eip1559(TxEip1559),
    Eip7702(TxEip7702),
}

impl TryFrom<TypedTransaction> for CustomBody {
    type Error = Error;

    fn try_from(tx: TypedTransaction) -> Result<Self> {
        match tx {
            TypedTransaction::Legacy(tx) => Ok(CustomBody::Legacy(tx)),
            TypedTransaction::Eip2930(tx) => Ok(CustomBody::Eip2930(tx)),
            TypedTransaction::Eip1559(tx) => Ok(CustomBody::Eip1559(tx)),
            TypedTransaction::Eip7702(tx) => Ok(CustomBody::Eip7702(tx)),
            TypedTransaction::Eip4844(_) => Err(Error::UnsupportedTransferShape(
                "blob transactions are not supported".to_string(),
            )),
        }
    }
}

/// Caller supplied transaction body, signed once by its sender
#[derive(Clone, Debug)]
pub struct CustomTx {
    body: CustomBody,
    signature: SingleSignature,
}

impl CustomTx {
    /// Wrap an unsigned body
    pub fn new(tx: TypedTransaction) -> Result<Self> {
        let body = CustomBody::try_from(tx)?;
        tracing::debug!("wrapped custom transaction {body:?}");
        Ok(Self {
            body,
            signature: SingleSignature::default(),
        })
    }

    /// Dynamic fee call to `args.to` carrying `data`.
    ///
    /// With empty `data` a token intent falls back to a plain token transfer.
    pub fn with_payload(
        args: &TransferArgs,
        input: &TxInput,
        chain: &ChainSpec,
        data: Bytes,
    ) -> Result<Self> {
        let (to, value, data) = match (args.contract, data.is_empty()) {
            (Some(_), false) => {
                return Err(Error::UnsupportedTransferShape(
                    "token transfers can't carry a custom payload".to_string(),
                ))
            }
            (Some(_), true) => destination_amount_data(args),
            (None, _) => (args.to, args.amount, data),
        };
        let fees = input.gas_fees();
        Self::new(TypedTransaction::Eip1559(TxEip1559 {
            chain_id: input.resolve_chain_id(chain),
            nonce: input.nonce,
            gas_limit: input.gas_limit,
            max_fee_per_gas: fees.max_fee_per_gas,
            max_priority_fee_per_gas: fees.max_priority_fee_per_gas,
            to: TxKind::Call(to),
            value,
            access_list: Default::default(),
            input: data,
        }))
    }
}

impl EvmTx for CustomTx {
    fn sighashes(&self) -> Result<Vec<SignatureRequest>> {
        let sighash = match &self.body {
            CustomBody::Legacy(tx) => tx.signature_hash(),
            CustomBody::Eip2930(tx) => tx.signature_hash(),
            CustomBody::Eip1559(tx) => tx.signature_hash(),
            CustomBody::Eip7702(tx) => tx.signature_hash(),
        };
        tracing::trace!("custom transaction sighash {sighash}");
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
        let signature = self.signature.get();
        Ok(match &self.body {
            CustomBody::Legacy(tx) => into_envelope(tx.clone(), signature),
            CustomBody::Eip2930(tx) => into_envelope(tx.clone(), signature),
            CustomBody::Eip1559(tx) => into_envelope(tx.clone(), signature),
            CustomBody::Eip7702(tx) => into_envelope(tx.clone(), signature),
        })
    }
}
