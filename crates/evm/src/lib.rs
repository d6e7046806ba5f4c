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

//! Crosschain EVM transaction building and multi-round signing.
//!
//! A [`Transaction`] wraps one of the [`TxVariant`]s and is signed in rounds:
//! sign every request from [`Transaction::sighashes`], add the responses, then keep
//! signing [`Transaction::additional_sighashes`] until it returns nothing.

pub mod calls;

mod error;
pub use error::{Error, Result};

pub mod payload;

mod signature;

mod transaction;
pub use transaction::Transaction;

pub mod tx;
pub use tx::{
    CustomTx, DynamicFeeTx, EvmTx, FeePayerTx, LegacyTx, SingleDelegationTx, TxVariant,
};
