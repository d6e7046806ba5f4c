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

use alloy_primitives::{Signature, U256};
use crosschain_types::{SignatureResponse, SIGNATURE_LENGTH};

use crate::{Error, Result};

pub(crate) type RawSignature = [u8; SIGNATURE_LENGTH];

/// Validate responses against the number of empty slots left.
///
/// Nothing is returned unless every response is well formed.
pub(crate) fn take_signatures(
    responses: &[SignatureResponse],
    remaining: usize,
) -> Result<Vec<RawSignature>> {
    if responses.len() > remaining {
        return Err(Error::TooManySignatures {
            expected: remaining,
            supplied: responses.len(),
        });
    }
    responses
        .iter()
        .map(|response| raw_signature(&response.signature))
        .collect()
}

pub(crate) fn raw_signature(bytes: &[u8]) -> Result<RawSignature> {
    bytes
        .try_into()
        .map_err(|_| Error::MalformedSignatureLength {
            expected: SIGNATURE_LENGTH,
            actual: bytes.len(),
        })
}

/// Read a raw signature as a transaction signature.
///
/// Accepts `v` as a bare parity, the `27 | 28` form or an EIP-155 value.
pub(crate) fn transaction_signature(raw: &RawSignature) -> Result<Signature> {
    let y_parity = match raw[64] {
        0 | 27 => false,
        1 | 28 => true,
        v if v >= 35 => (v - 35) % 2 == 1,
        v => return Err(Error::InvalidSignatureParity(v)),
    };
    Ok(Signature::new(
        U256::from_be_slice(&raw[..32]),
        U256::from_be_slice(&raw[32..64]),
        y_parity,
    ))
}

/// EIP-2098 compact form `(r, vs)`, the top bit of `vs` carries the y parity.
pub(crate) fn compact(raw: &RawSignature) -> (U256, U256) {
    let mut vs = [0_u8; 32];
    vs.copy_from_slice(&raw[32..64]);
    if raw[64] == 1 || raw[64] == 28 {
        vs[0] |= 0x80;
    }
    (U256::from_be_slice(&raw[..32]), U256::from_be_bytes(vs))
}
