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

use alloy_consensus::{SignableTransaction, TxEip7702, TxEnvelope};
use alloy_eips::eip7702::SignedAuthorization;
use alloy_primitives::{Address, Signature, B256, U256};
use crosschain_types::{
    chain::SmartAccountConfig, Authorization, ChainSpec, MultiTransferArgs, SignatureRequest,
    SignatureResponse, TxInput,
};

use super::{into_envelope, EvmTx};
use crate::{
    calls::{handle_ops_calldata, handle_ops_digest, pack_calls, SmartAccountCall},
    payload::destination_amount_data,
    signature::{take_signatures, transaction_signature, RawSignature},
    Error, Result,
};

#[derive(Clone, Debug, Default)]
enum FeePayerState {
    #[default]
    Unsigned,
    Authorized(SignedAuthorization),
    BatchSigned {
        authorization: SignedAuthorization,
        batch_signature: RawSignature,
    },
    Signed {
        authorization: SignedAuthorization,
        batch_signature: RawSignature,
        signature: Signature,
    },
}

impl FeePayerState {
    fn remaining(&self) -> usize {
        match self {
            FeePayerState::Unsigned => 3,
            FeePayerState::Authorized(_) => 2,
            FeePayerState::BatchSigned { .. } => 1,
            FeePayerState::Signed { .. } => 0,
        }
    }
}

/// Call batch executed by a delegated smart account and broadcast by a fee payer.
///
/// Three signatures, in order:
/// 1. the account owner's authorization delegating to the smart account
/// 2. the account owner's signature over the call batch
/// 3. the fee payer's signature over the outer transaction
///
/// The first two are requested together. The outer transaction embeds both, so its
/// digest is only available once they were added.
#[derive(Clone, Debug)]
pub struct FeePayerTx {
    from: Address,
    fee_payer: Address,
    calls: Vec<SmartAccountCall>,
    input: TxInput,
    chain_id: u64,
    smart_account: SmartAccountConfig,
    state: FeePayerState,
}

impl FeePayerTx {
    /// Create an unsigned batch.
    ///
    /// The fee payer is taken from `args`, falling back to the input's.
    pub fn new(args: MultiTransferArgs, input: TxInput, chain: &ChainSpec) -> Result<Self> {
        if args.receivers.is_empty() {
            return Err(Error::UnsupportedTransferShape(
                "fee payer batch has no transfers".to_string(),
            ));
        }
        let fee_payer = args
            .fee_payer
            .or(input.fee_payer_address)
            .ok_or_else(|| Error::UnsupportedTransferShape("missing fee payer".to_string()))?;

        let calls = args
            .as_account_transfers()
            .iter()
            .map(|transfer| {
                let (to, value, data) = destination_amount_data(transfer);
                SmartAccountCall { to, value, data }
            })
            .collect::<Vec<_>>();
        let chain_id = input.resolve_chain_id(chain);

        tracing::debug!(
            "built fee payer batch of {} calls from {:?} paid by {fee_payer:?} on chain {chain_id}",
            calls.len(),
            args.from
        );
        Ok(Self {
            from: args.from,
            fee_payer,
            calls,
            input,
            chain_id,
            smart_account: chain.smart_account,
            state: FeePayerState::default(),
        })
    }

    /// Account paying for gas
    pub fn fee_payer(&self) -> Address {
        self.fee_payer
    }

    /// Calls the smart account executes
    pub fn calls(&self) -> &[SmartAccountCall] {
        &self.calls
    }

    /// Unsigned authorization delegating the owner's account to the smart account
    pub fn authorization(&self) -> Authorization {
        Authorization::new(
            U256::from(self.chain_id),
            self.smart_account.address,
            self.input.nonce,
        )
    }

    /// Digest the account owner signs over the call batch
    pub fn batch_digest(&self) -> B256 {
        handle_ops_digest(
            &self.smart_account,
            U256::from(self.chain_id),
            self.from,
            &pack_calls(&self.calls),
            U256::from(self.input.smart_account_nonce),
        )
    }

    fn body(&self, authorization: SignedAuthorization, batch_signature: &RawSignature) -> TxEip7702 {
        let fees = self.input.gas_fees();
        TxEip7702 {
            chain_id: self.chain_id,
            nonce: self.input.fee_payer_nonce,
            gas_limit: self.input.gas_limit,
            max_fee_per_gas: fees.max_fee_per_gas,
            max_priority_fee_per_gas: fees.max_priority_fee_per_gas,
            to: self.from,
            value: U256::ZERO,
            access_list: Default::default(),
            authorization_list: vec![authorization],
            input: handle_ops_calldata(pack_calls(&self.calls), batch_signature),
        }
    }
}

impl EvmTx for FeePayerTx {
    fn sighashes(&self) -> Result<Vec<SignatureRequest>> {
        let authorization_sighash = self.authorization().sighash();
        tracing::trace!("authorization sighash {authorization_sighash}");
        Ok(vec![
            SignatureRequest::for_signer(authorization_sighash, self.from),
            SignatureRequest::for_signer(self.batch_digest(), self.from),
        ])
    }

    fn additional_sighashes(&self) -> Result<Vec<SignatureRequest>> {
        match &self.state {
            FeePayerState::Unsigned | FeePayerState::Authorized(_) => {
                Err(Error::MissingInitialSignatures)
            }
            FeePayerState::BatchSigned {
                authorization,
                batch_signature,
            } => {
                let sighash = self
                    .body(authorization.clone(), batch_signature)
                    .signature_hash();
                tracing::debug!("fee payer {:?} signs outer transaction", self.fee_payer);
                tracing::trace!("fee payer sighash {sighash}");
                Ok(vec![SignatureRequest::for_signer(sighash, self.fee_payer)])
            }
            FeePayerState::Signed { .. } => Ok(vec![]),
        }
    }

    fn add_signatures(&mut self, responses: &[SignatureResponse]) -> Result<()> {
        let raws = take_signatures(responses, self.state.remaining())?;
        let mut state = self.state.clone();
        for raw in raws {
            state = match state {
                FeePayerState::Unsigned => {
                    FeePayerState::Authorized(self.authorization().set_signature(&raw))
                }
                FeePayerState::Authorized(authorization) => FeePayerState::BatchSigned {
                    authorization,
                    batch_signature: raw,
                },
                FeePayerState::BatchSigned {
                    authorization,
                    batch_signature,
                } => FeePayerState::Signed {
                    authorization,
                    batch_signature,
                    signature: transaction_signature(&raw)?,
                },
                FeePayerState::Signed { .. } => {
                    return Err(Error::TooManySignatures {
                        expected: 0,
                        supplied: 1,
                    })
                }
            };
        }
        self.state = state;
        Ok(())
    }

    fn is_signed(&self) -> bool {
        matches!(self.state, FeePayerState::Signed { .. })
    }

    fn envelope(&self) -> Result<TxEnvelope> {
        match &self.state {
            FeePayerState::Unsigned | FeePayerState::Authorized(_) => {
                Err(Error::MissingInitialSignatures)
            }
            FeePayerState::BatchSigned {
                authorization,
                batch_signature,
            } => Ok(into_envelope(
                self.body(authorization.clone(), batch_signature),
                None,
            )),
            FeePayerState::Signed {
                authorization,
                batch_signature,
                signature,
            } => Ok(into_envelope(
                self.body(authorization.clone(), batch_signature),
                Some(*signature),
            )),
        }
    }
}
