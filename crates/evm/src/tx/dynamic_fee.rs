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

use alloy_consensus::{SignableTransaction, TxEip1559, TxEnvelope};
use alloy_primitives::TxKind;
use crosschain_types::{ChainSpec, SignatureRequest, SignatureResponse, TransferArgs, TxInput};

use super::{into_envelope, EvmTx, SingleSignature};
use crate::{payload::destination_amount_data, Result};

/// EIP-1559 transfer
#[derive(Clone, Debug)]
pub struct DynamicFeeTx {
    body: TxEip1559,
    signature: SingleSignature,
}

impl DynamicFeeTx {
    /// Build a transfer priced with the input's fee caps
    pub fn new(args: &TransferArgs, input: &TxInput, chain: &ChainSpec) -> Self {
        let (to, value, data) = destination_amount_data(args);
        let fees = input.gas_fees();
        let body = TxEip1559 {
            chain_id: input.resolve_chain_id(chain),
            nonce: input.nonce,
            gas_limit: input.gas_limit,
            max_fee_per_gas: fees.max_fee_per_gas,
            max_priority_fee_per_gas: fees.max_priority_fee_per_gas,
            to: TxKind::Call(to),
            value,
            access_list: Default::default(),
            input: data,
        };
        tracing::debug!("built dynamic fee transaction {body:?}");
        Self {
            body,
            signature: SingleSignature::default(),
        }
    }

    /// Unsigned body
    pub fn body(&self) -> &TxEip1559 {
        &self.body
    }
}

impl EvmTx for DynamicFeeTx {
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

#[cfg(test)]
mod tests {
    use alloy_consensus::Transaction as _;
    use alloy_eips::eip2718::Decodable2718;
    use alloy_primitives::{Address, U256};

    use super::*;
    use crate::{payload::parse_erc20_transfer, tx::test_utils::*, Error};

    #[test]
    fn test_token_transfer_calls_contract() {
        let token = Address::repeat_byte(0xc0);
        let args = TransferArgs::token(FROM, TO, U256::from(9), token);
        let tx = DynamicFeeTx::new(&args, &input(), &chain());

        assert_eq!(tx.body().to, TxKind::Call(token));
        assert_eq!(tx.body().value, U256::ZERO);
        assert_eq!(
            parse_erc20_transfer(&tx.body().input),
            Some((TO, U256::from(9)))
        );
    }

    #[test]
    fn test_input_chain_id_wins() {
        let input = TxInput {
            chain_id: 8453,
            ..input()
        };
        let tx = DynamicFeeTx::new(&native_transfer(), &input, &chain());
        assert_eq!(tx.body().chain_id, 8453);
    }

    #[test]
    fn test_dynamic_fee_sign_and_serialize() {
        let mut tx = DynamicFeeTx::new(&native_transfer(), &input(), &chain());
        assert_eq!(tx.serialize(), Err(Error::IncompleteSignatures));

        let mut raw = vec![0x33; 65];
        raw[64] = 28;
        tx.add_signatures(&[SignatureResponse::new(raw)]).unwrap();

        let encoded = tx.serialize().unwrap();
        assert_eq!(encoded[0], 0x02);
        let decoded = TxEnvelope::decode_2718(&mut encoded.as_ref()).unwrap();
        let signed = decoded.as_eip1559().unwrap();
        assert!(signed.signature().v());
        assert_eq!(decoded.max_priority_fee_per_gas(), Some(1_000_000_000));
    }

    #[test]
    fn test_bad_parity_leaves_tx_unsigned() {
        let mut tx = DynamicFeeTx::new(&native_transfer(), &input(), &chain());
        let mut raw = vec![0x33; 65];
        raw[64] = 3;
        assert_eq!(
            tx.add_signatures(&[SignatureResponse::new(raw)]),
            Err(Error::InvalidSignatureParity(3))
        );
        assert!(!tx.is_signed());
    }
}
