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

#![warn(missing_docs, unreachable_pub, unused_crate_dependencies)]
#![deny(unused_must_use, rust_2018_idioms)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]
//! Signers driving Crosschain transactions through their signing rounds

use std::sync::Arc;

use alloy_primitives::Bytes;
use crosschain_evm::Transaction;
use secrecy::SecretString;

mod error;
pub use error::{Error, Result};

mod local;

mod manager;
#[cfg(feature = "test-utils")]
pub use manager::MockDigestSigner;
pub use manager::{encode_signature, DigestSigner, SignerSet};

/// Most signing rounds a transaction may take
pub const MAX_SIGNING_ROUNDS: usize = 4;

/// Where signing keys come from
#[derive(Debug)]
pub enum SigningScheme {
    /// List of private keys, the first is the default signer
    PrivateKeys {
        /// Private keys
        private_keys: Vec<SecretString>,
    },
    /// Mnemonic, the first derived key is the default signer
    Mnemonic {
        /// Mnemonic
        mnemonic: SecretString,
        /// Number of keys to derive
        num_keys: usize,
    },
}

/// Create a signer set
pub fn new_signer_set(scheme: &SigningScheme) -> Result<SignerSet> {
    let signers = match scheme {
        SigningScheme::PrivateKeys { private_keys } => {
            local::construct_signers_from_private_keys(private_keys)?
        }
        SigningScheme::Mnemonic { mnemonic, num_keys } => {
            local::construct_signers_from_mnemonic(mnemonic, *num_keys)?
        }
    };

    let set = SignerSet::from_signers(
        signers
            .into_iter()
            .map(|signer| Arc::new(signer) as Arc<dyn DigestSigner>)
            .collect(),
    )?;
    tracing::info!(
        "created signer set with {} signers, default {:?}",
        set.addresses().len(),
        set.default_address()
    );
    Ok(set)
}

/// Sign every round of `tx` and return its wire encoding.
///
/// Fails with [`Error::TooManyRounds`] if the transaction still asks for
/// signatures after [`MAX_SIGNING_ROUNDS`].
pub async fn sign_transaction(tx: &mut Transaction, signers: &SignerSet) -> Result<Bytes> {
    let mut requests = tx.sighashes()?;

    for round in 1..=MAX_SIGNING_ROUNDS {
        tracing::debug!(
            "signing round {round} of {} transaction: {} requests",
            tx.variant().name(),
            requests.len()
        );
        let responses = signers.sign_all(&requests).await?;
        tx.add_signatures(responses)?;

        requests = tx.additional_sighashes()?;
        if requests.is_empty() {
            let encoded = tx.serialize()?;
            let hash = tx.hash()?;
            tracing::info!(
                "signed {} transaction {hash:?} in {round} rounds",
                tx.variant().name()
            );
            return Ok(encoded);
        }
    }

    Err(Error::TooManyRounds)
}
