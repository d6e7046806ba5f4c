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

use alloy_primitives::Address;
use alloy_signer_local::LocalSignerError;

/// Error type for the signer crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Signing error
    #[error("signing error: {0}")]
    SigningError(String),
    /// No signer holds the key a request is addressed to
    #[error("no signer for address {0:?}")]
    UnknownSigner(Address),
    /// Transaction rejected a signature or couldn't be built
    #[error(transparent)]
    Transaction(#[from] crosschain_evm::Error),
    /// Transaction kept asking for signatures
    #[error("transaction still needs signatures after the maximum number of rounds")]
    TooManyRounds,
    /// Other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type for the signer crate
pub type Result<T> = std::result::Result<T, Error>;

impl From<alloy_signer::Error> for Error {
    fn from(value: alloy_signer::Error) -> Self {
        Error::SigningError(value.to_string())
    }
}

impl From<LocalSignerError> for Error {
    fn from(value: LocalSignerError) -> Self {
        Error::SigningError(value.to_string())
    }
}
