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

//! Crosschain common types

mod authorization;
pub use authorization::{Authorization, AUTHORIZATION_MAGIC};

pub mod chain;
pub use chain::{ChainSpec, SmartAccountConfig};

mod gas;
pub use gas::{transaction_fee, GasFees};

mod input;
pub use input::TxInput;

mod signature;
pub use signature::{SignatureRequest, SignatureResponse, SIGNATURE_LENGTH};

mod transfer;
pub use transfer::{MultiTransferArgs, Receiver, TransferArgs};
