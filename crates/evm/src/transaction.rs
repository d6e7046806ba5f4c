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

use alloy_consensus::{Transaction as _, TxEnvelope};
use alloy_primitives::{Address, Bytes, B256, U256};
use crosschain_types::{transaction_fee, SignatureRequest, SignatureResponse};

use crate::{
    payload::parse_erc20_transfer,
    tx::{EvmTx, TxVariant},
    Error, Result,
};

/// A transaction being signed, along with every signature response it accepted
#[derive(Clone, Debug)]
pub struct Transaction {
    variant: TxVariant,
    signatures: Vec<SignatureResponse>,
}

impl Transaction {
    /// Start signing `variant`
    pub fn new(variant: impl Into<TxVariant>) -> Self {
        Self {
            variant: variant.into(),
            signatures: vec![],
        }
    }

    /// The wrapped variant
    pub fn variant(&self) -> &TxVariant {
        &self.variant
    }

    /// Hash of the transaction body
    pub fn hash(&self) -> Result<B256> {
        self.variant.hash()
    }

    /// First round digests to sign
    pub fn sighashes(&self) -> Result<Vec<SignatureRequest>> {
        self.variant.sighashes()
    }

    /// Digests left to sign after the first round
    pub fn additional_sighashes(&self) -> Result<Vec<SignatureRequest>> {
        self.variant.additional_sighashes()
    }

    /// Add responses to the next signature slots, in request order
    pub fn add_signatures(&mut self, responses: Vec<SignatureResponse>) -> Result<()> {
        self.variant.add_signatures(&responses)?;
        self.signatures.extend(responses);
        tracing::debug!(
            "{} transaction holds {} signatures, signed: {}",
            self.variant.name(),
            self.signatures.len(),
            self.variant.is_signed()
        );
        Ok(())
    }

    /// Every response accepted so far, in order
    pub fn signatures(&self) -> &[SignatureResponse] {
        &self.signatures
    }

    /// True once every signature slot is filled
    pub fn is_signed(&self) -> bool {
        self.variant.is_signed()
    }

    /// Wire encoding of the signed transaction
    pub fn serialize(&self) -> Result<Bytes> {
        self.variant.serialize()
    }

    /// Whether the transaction calls a contract rather than sending native value
    pub fn is_contract(&self) -> Result<bool> {
        Ok(!self.variant.envelope()?.input().is_empty())
    }

    /// Recipient of the transfer, looking through ERC-20 `transfer` calls
    pub fn to(&self) -> Result<Option<Address>> {
        let envelope = self.variant.envelope()?;
        Ok(match parse_erc20_transfer(envelope.input()) {
            Some((to, _)) => Some(to),
            None => envelope.to(),
        })
    }

    /// Amount transferred, looking through ERC-20 `transfer` calls
    pub fn amount(&self) -> Result<U256> {
        let envelope = self.variant.envelope()?;
        Ok(match parse_erc20_transfer(envelope.input()) {
            Some((_, amount)) => amount,
            None => envelope.value(),
        })
    }

    /// Contract called, if any
    pub fn contract_address(&self) -> Result<Option<Address>> {
        let envelope = self.variant.envelope()?;
        if envelope.input().is_empty() {
            return Ok(None);
        }
        Ok(envelope.to())
    }

    /// Fee paid once landed with `gas_used` at `base_fee`
    pub fn fee(&self, base_fee: u128, gas_used: u64) -> Result<U256> {
        let envelope = self.variant.envelope()?;
        let tip = envelope.max_priority_fee_per_gas().unwrap_or_default();
        Ok(transaction_fee(
            tip,
            envelope.max_fee_per_gas(),
            base_fee,
            gas_used,
        ))
    }

    /// Account that signed the outer transaction, `None` until fully signed
    pub fn sender(&self) -> Result<Option<Address>> {
        if !self.variant.is_signed() {
            return Ok(None);
        }
        recover_sender(&self.variant.envelope()?).map(Some)
    }
}

fn recover_sender(envelope: &TxEnvelope) -> Result<Address> {
    envelope
        .signature()
        .recover_address_from_prehash(&envelope.signature_hash())
        .map_err(|e| Error::SignerRecovery(e.to_string()))
}
