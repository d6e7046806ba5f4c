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

//! Transaction variants and the common signing contract they share.

use alloy_consensus::{SignableTransaction, Signed, TxEnvelope};
use alloy_eips::eip2718::Encodable2718;
use alloy_primitives::{Bytes, Signature, B256, U256};
use crosschain_types::{SignatureRequest, SignatureResponse};

use crate::{
    signature::{take_signatures, transaction_signature},
    Error, Result,
};

mod custom;
pub use custom::CustomTx;

mod dynamic_fee;
pub use dynamic_fee::DynamicFeeTx;

mod fee_payer;
pub use fee_payer::FeePayerTx;

mod legacy;
pub use legacy::LegacyTx;

mod single_delegation;
pub use single_delegation::SingleDelegationTx;

/// A transaction that is signed in one or more rounds.
///
/// Round one digests come from [`sighashes`](EvmTx::sighashes). Digests of later
/// rounds can depend on earlier signatures and come from
/// [`additional_sighashes`](EvmTx::additional_sighashes). Signing is complete when
/// that returns no requests.
pub trait EvmTx {
    /// First round digests, in the order their signatures must be added
    fn sighashes(&self) -> Result<Vec<SignatureRequest>>;

    /// Digests that need signing after the first round, empty when nothing is left.
    ///
    /// Fails with [`Error::MissingInitialSignatures`] if called before the
    /// signatures these digests depend on were added.
    fn additional_sighashes(&self) -> Result<Vec<SignatureRequest>>;

    /// Fill the next empty signature slots with `responses`, in order.
    ///
    /// Only responses for slots that are still empty are passed, never the ones
    /// already added in an earlier round. Re-sending the full list fails with
    /// [`Error::TooManySignatures`]. Either every response is accepted or none are.
    fn add_signatures(&mut self, responses: &[SignatureResponse]) -> Result<()>;

    /// True once every signature slot is filled
    fn is_signed(&self) -> bool;

    /// Envelope of the transaction body. Unsigned bodies carry a zero signature.
    fn envelope(&self) -> Result<TxEnvelope>;

    /// Hash of the transaction body
    fn hash(&self) -> Result<B256> {
        Ok(*self.envelope()?.tx_hash())
    }

    /// EIP-2718 encoding of the fully signed transaction
    fn serialize(&self) -> Result<Bytes> {
        if !self.is_signed() {
            return Err(Error::IncompleteSignatures);
        }
        Ok(self.envelope()?.encoded_2718().into())
    }
}

/// Every supported EVM transaction variant
#[derive(Clone, Debug)]
pub enum TxVariant {
    /// Pre EIP-2718 transaction
    Legacy(LegacyTx),
    /// EIP-1559 transaction
    DynamicFee(DynamicFeeTx),
    /// EIP-7702 transaction clearing the sender's delegation
    SingleDelegation(SingleDelegationTx),
    /// EIP-7702 batch broadcast by a fee payer
    FeePayer(FeePayerTx),
    /// Caller supplied transaction body
    Custom(CustomTx),
}

impl TxVariant {
    /// Short name of the variant, for logging
    pub fn name(&self) -> &'static str {
        match self {
            TxVariant::Legacy(_) => "legacy",
            TxVariant::DynamicFee(_) => "dynamic_fee",
            TxVariant::SingleDelegation(_) => "single_delegation",
            TxVariant::FeePayer(_) => "fee_payer",
            TxVariant::Custom(_) => "custom",
        }
    }
}

impl EvmTx for TxVariant {
    fn sighashes(&self) -> Result<Vec<SignatureRequest>> {
        match self {
            TxVariant::Legacy(tx) => tx.sighashes(),
            TxVariant::DynamicFee(tx) => tx.sighashes(),
            TxVariant::SingleDelegation(tx) => tx.sighashes(),
            TxVariant::FeePayer(tx) => tx.sighashes(),
            TxVariant::Custom(tx) => tx.sighashes(),
        }
    }

    fn additional_sighashes(&self) -> Result<Vec<SignatureRequest>> {
        match self {
            TxVariant::Legacy(tx) => tx.additional_sighashes(),
            TxVariant::DynamicFee(tx) => tx.additional_sighashes(),
            TxVariant::SingleDelegation(tx) => tx.additional_sighashes(),
            TxVariant::FeePayer(tx) => tx.additional_sighashes(),
            TxVariant::Custom(tx) => tx.additional_sighashes(),
        }
    }

    fn add_signatures(&mut self, responses: &[SignatureResponse]) -> Result<()> {
        match self {
            TxVariant::Legacy(tx) => tx.add_signatures(responses),
            TxVariant::DynamicFee(tx) => tx.add_signatures(responses),
            TxVariant::SingleDelegation(tx) => tx.add_signatures(responses),
            TxVariant::FeePayer(tx) => tx.add_signatures(responses),
            TxVariant::Custom(tx) => tx.add_signatures(responses),
        }
    }

    fn is_signed(&self) -> bool {
        match self {
            TxVariant::Legacy(tx) => tx.is_signed(),
            TxVariant::DynamicFee(tx) => tx.is_signed(),
            TxVariant::SingleDelegation(tx) => tx.is_signed(),
            TxVariant::FeePayer(tx) => tx.is_signed(),
            TxVariant::Custom(tx) => tx.is_signed(),
        }
    }

    fn envelope(&self) -> Result<TxEnvelope> {
        match self {
            TxVariant::Legacy(tx) => tx.envelope(),
            TxVariant::DynamicFee(tx) => tx.envelope(),
            TxVariant::SingleDelegation(tx) => tx.envelope(),
            TxVariant::FeePayer(tx) => tx.envelope(),
            TxVariant::Custom(tx) => tx.envelope(),
        }
    }
}

impl From<LegacyTx> for TxVariant {
    fn from(tx: LegacyTx) -> Self {
        TxVariant::Legacy(tx)
    }
}

impl From<DynamicFeeTx> for TxVariant {
    fn from(tx: DynamicFeeTx) -> Self {
        TxVariant::DynamicFee(tx)
    }
}

impl From<SingleDelegationTx> for TxVariant {
    fn from(tx: SingleDelegationTx) -> Self {
        TxVariant::SingleDelegation(tx)
    }
}

impl From<FeePayerTx> for TxVariant {
    fn from(tx: FeePayerTx) -> Self {
        TxVariant::FeePayer(tx)
    }
}

impl From<CustomTx> for TxVariant {
    fn from(tx: CustomTx) -> Self {
        TxVariant::Custom(tx)
    }
}

/// Signature slot of a transaction with a single signer
#[derive(Clone, Debug, Default)]
pub(crate) enum SingleSignature {
    #[default]
    Unsigned,
    Signed(Signature),
}

impl SingleSignature {
    pub(crate) fn add(&mut self, responses: &[SignatureResponse]) -> Result<()> {
        let remaining = match self {
            SingleSignature::Unsigned => 1,
            SingleSignature::Signed(_) => 0,
        };
        if let Some(raw) = take_signatures(responses, remaining)?.first() {
            *self = SingleSignature::Signed(transaction_signature(raw)?);
        }
        Ok(())
    }

    pub(crate) fn get(&self) -> Option<Signature> {
        match self {
            SingleSignature::Unsigned => None,
            SingleSignature::Signed(signature) => Some(*signature),
        }
    }

    pub(crate) fn is_signed(&self) -> bool {
        matches!(self, SingleSignature::Signed(_))
    }
}

/// Wrap a body in an envelope, using a zero signature when unsigned
pub(crate) fn into_envelope<T>(tx: T, signature: Option<Signature>) -> TxEnvelope
where
    T: SignableTransaction<Signature>,
    TxEnvelope: From<Signed<T>>,
{
    let signature = signature.unwrap_or_else(|| Signature::new(U256::ZERO, U256::ZERO, false));
    tx.into_signed(signature).into()
}

#[cfg(test)]
pub(crate) mod test_utils {
    use alloy_primitives::{address, Address, U256};
    use crosschain_types::{ChainSpec, SignatureResponse, TransferArgs, TxInput};

    pub(crate) const FROM: Address = address!("0x00000000000000000000000000000000000000f1");
    pub(crate) const TO: Address = address!("0x00000000000000000000000000000000000000e2");

    pub(crate) fn chain() -> ChainSpec {
        ChainSpec {
            id: 10,
            ..Default::default()
        }
    }

    pub(crate) fn input() -> TxInput {
        TxInput {
            nonce: 7,
            from_address: FROM,
            gas_limit: 100_000,
            gas_tip_cap: 1_000_000_000,
            gas_fee_cap: 30_000_000_000,
            gas_price: 20_000_000_000,
            ..Default::default()
        }
    }

    pub(crate) fn native_transfer() -> TransferArgs {
        TransferArgs::native(FROM, TO, U256::from(1_000))
    }

    /// Arbitrary well formed signature, `v` of 0
    pub(crate) fn response(fill: u8) -> SignatureResponse {
        let mut raw = vec![fill; 65];
        raw[64] = 0;
        SignatureResponse::new(raw)
    }
}
