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
use alloy_primitives::{Address, Signature, U256};
use crosschain_types::{
    Authorization, ChainSpec, SignatureRequest, SignatureResponse, TransferArgs, TxInput,
};

use super::{into_envelope, EvmTx};
use crate::{
    payload::destination_amount_data,
    signature::{take_signatures, transaction_signature},
    Error, Result,
};

#[derive(Clone, Debug, Default)]
enum DelegationState {
    #[default]
    Unsigned,
    Authorized(SignedAuthorization),
    Signed {
        authorization: SignedAuthorization,
        signature: Signature,
    },
}

impl DelegationState {
    fn remaining(&self) -> usize {
        match self {
            DelegationState::Unsigned => 2,
            DelegationState::Authorized(_) => 1,
            DelegationState::Signed { .. } => 0,
        }
    }
}

/// EIP-7702 transfer that re-delegates the sender to the no-op delegate.
///
/// The sender signs twice: first the authorization, then the transaction
/// embedding it. The authorization nonce is one past the transaction nonce since
/// the sender's nonce is bumped before authorizations are applied.
#[derive(Clone, Debug)]
pub struct SingleDelegationTx {
    args: TransferArgs,
    input: TxInput,
    chain_id: u64,
    delegate: Address,
    state: DelegationState,
}

impl SingleDelegationTx {
    /// Create an unsigned transfer
    pub fn new(args: TransferArgs, input: TxInput, chain: &ChainSpec) -> Self {
        let chain_id = input.resolve_chain_id(chain);
        tracing::debug!(
            "built single delegation transfer from {:?} on chain {chain_id}",
            args.from
        );
        Self {
            args,
            input,
            chain_id,
            delegate: chain.no_delegation_address,
            state: DelegationState::default(),
        }
    }

    /// Unsigned authorization the sender signs in the first round
    pub fn authorization(&self) -> Result<Authorization> {
        let authority_nonce = self.input.nonce.checked_add(1).ok_or(Error::NonceOverflow)?;
        Ok(Authorization::new(
            U256::from(self.chain_id),
            self.delegate,
            authority_nonce,
        ))
    }

    fn body(&self, authorization: SignedAuthorization) -> TxEip7702 {
        let (to, value, input) = destination_amount_data(&self.args);
        let fees = self.input.gas_fees();
        TxEip7702 {
            chain_id: self.chain_id,
            nonce: self.input.nonce,
            gas_limit: self.input.gas_limit,
            max_fee_per_gas: fees.max_fee_per_gas,
            max_priority_fee_per_gas: fees.max_priority_fee_per_gas,
            to,
            value,
            access_list: Default::default(),
            authorization_list: vec![authorization],
            input,
        }
    }
}

impl EvmTx for SingleDelegationTx {
    fn sighashes(&self) -> Result<Vec<SignatureRequest>> {
        let sighash = self.authorization()?.sighash();
        tracing::trace!("authorization sighash {sighash}");
        Ok(vec![SignatureRequest::new(sighash)])
    }

    fn additional_sighashes(&self) -> Result<Vec<SignatureRequest>> {
        match &self.state {
            DelegationState::Unsigned => Err(Error::MissingInitialSignatures),
            DelegationState::Authorized(authorization) => {
                let sighash = self.body(authorization.clone()).signature_hash();
                tracing::trace!("delegation transaction sighash {sighash}");
                Ok(vec![SignatureRequest::new(sighash)])
            }
            DelegationState::Signed { .. } => Ok(vec![]),
        }
    }

    fn add_signatures(&mut self, responses: &[SignatureResponse]) -> Result<()> {
        let raws = take_signatures(responses, self.state.remaining())?;
        let mut state = self.state.clone();
        for raw in &raws {
            state = match state {
                DelegationState::Unsigned => {
                    DelegationState::Authorized(self.authorization()?.set_signature(raw))
                }
                DelegationState::Authorized(authorization) => DelegationState::Signed {
                    authorization,
                    signature: transaction_signature(raw)?,
                },
                DelegationState::Signed { .. } => {
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
        matches!(self.state, DelegationState::Signed { .. })
    }

    fn envelope(&self) -> Result<TxEnvelope> {
        match &self.state {
            DelegationState::Unsigned => Err(Error::MissingInitialSignatures),
            DelegationState::Authorized(authorization) => {
                Ok(into_envelope(self.body(authorization.clone()), None))
            }
            DelegationState::Signed {
                authorization,
                signature,
            } => Ok(into_envelope(
                self.body(authorization.clone()),
                Some(*signature),
            )),
        }
    }
}
