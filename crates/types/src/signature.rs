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

use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

/// Width of a raw recoverable ECDSA signature: `r (32) || s (32) || v (1)`.
pub const SIGNATURE_LENGTH: usize = 65;

/// A digest that must be signed, optionally by a specific account.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRequest {
    /// The digest to sign
    pub payload: B256,
    /// The account that must produce the signature, if not the transaction sender
    pub signer: Option<Address>,
}

impl SignatureRequest {
    /// A request that may be signed by the default signer
    pub fn new(payload: B256) -> Self {
        Self {
            payload,
            signer: None,
        }
    }

    /// A request that must be routed to `signer`
    pub fn for_signer(payload: B256, signer: Address) -> Self {
        Self {
            payload,
            signer: Some(signer),
        }
    }
}

/// Raw signature bytes answering one [`SignatureRequest`].
///
/// Responses are matched to requests by position.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureResponse {
    /// Raw `r || s || v` bytes
    pub signature: Bytes,
    /// The account that signed, when known
    pub signer: Option<Address>,
}

impl SignatureResponse {
    /// Create a response from raw signature bytes
    pub fn new(signature: impl Into<Bytes>) -> Self {
        Self {
            signature: signature.into(),
            signer: None,
        }
    }

    /// Record which account produced this signature
    pub fn with_signer(mut self, signer: Address) -> Self {
        self.signer = Some(signer);
        self
    }
}
