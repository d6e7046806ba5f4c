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

/// Error type for building and signing EVM transactions
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Serialization was requested before every signature slot was filled
    #[error("transaction is missing signatures")]
    IncompleteSignatures,
    /// Second round digests were requested before the first round was signed
    #[error("missing initial signature responses")]
    MissingInitialSignatures,
    /// A signature is not `r || s || v`
    #[error("signature must be {expected} bytes, got {actual}")]
    MalformedSignatureLength {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },
    /// The transfer can't be expressed by this transaction variant
    #[error("unsupported transfer: {0}")]
    UnsupportedTransferShape(String),
    /// More signatures were supplied than there are empty slots
    #[error("expected at most {expected} signatures, got {supplied}")]
    TooManySignatures {
        /// Empty slots remaining
        expected: usize,
        /// Signatures supplied
        supplied: usize,
    },
    /// Transaction signature recovery id is not a valid parity value
    #[error("invalid signature parity value {0}")]
    InvalidSignatureParity(u8),
    /// The delegated authority nonce doesn't fit in 64 bits
    #[error("nonce overflow")]
    NonceOverflow,
    /// The signer couldn't be recovered from a transaction signature
    #[error("signer recovery failed: {0}")]
    SignerRecovery(String),
}

/// Result type for the EVM transaction crate
pub type Result<T> = std::result::Result<T, Error>;
