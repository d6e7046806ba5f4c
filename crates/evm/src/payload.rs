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

//! ERC-20 calldata and transfer destinations.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use crosschain_contracts::erc20::IERC20;
use crosschain_types::TransferArgs;

const TRANSFER_CALLDATA_SIZE: usize = 4 + 32 * 2;

/// `transfer(to, amount)` calldata
pub fn erc20_transfer_payload(to: Address, amount: U256) -> Bytes {
    IERC20::transferCall { to, amount }.abi_encode().into()
}

/// Recipient and amount of `transfer(address,uint256)` calldata.
///
/// Returns `None` for anything else.
pub fn parse_erc20_transfer(data: &[u8]) -> Option<(Address, U256)> {
    if data.len() != TRANSFER_CALLDATA_SIZE || data[..4] != IERC20::transferCall::SELECTOR {
        return None;
    }
    let to = Address::from_slice(&data[4 + 12..4 + 32]);
    let amount = U256::from_be_slice(&data[4 + 32..]);
    Some((to, amount))
}

/// Call target, value and calldata carrying a transfer.
///
/// Native transfers send value to the recipient, token transfers call the contract.
pub(crate) fn destination_amount_data(args: &TransferArgs) -> (Address, U256, Bytes) {
    match args.contract {
        Some(contract) => (
            contract,
            U256::ZERO,
            erc20_transfer_payload(args.to, args.amount),
        ),
        None => (args.to, args.amount, Bytes::new()),
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, hex};

    use super::*;

    #[test]
    fn test_erc20_transfer_payload() {
        let payload = erc20_transfer_payload(
            address!("0x4592d8f8d7b001e72cb26a73e4fa1806a51ac79d"),
            U256::from(1_000_000_000_000_000_000_000_u128),
        );
        assert_eq!(
            hex::encode(payload),
            concat!(
                "a9059cbb",
                "0000000000000000000000004592d8f8d7b001e72cb26a73e4fa1806a51ac79d",
                "00000000000000000000000000000000000000000000003635c9adc5dea00000"
            )
        );
    }

    #[test]
    fn test_parse_erc20_transfer() {
        let to = address!("0x4592d8f8d7b001e72cb26a73e4fa1806a51ac79d");
        let payload = erc20_transfer_payload(to, U256::from(42));
        assert_eq!(parse_erc20_transfer(&payload), Some((to, U256::from(42))));

        assert_eq!(parse_erc20_transfer(&payload[..payload.len() - 1]), None);
        let mut other = payload.to_vec();
        other[0] = 0;
        assert_eq!(parse_erc20_transfer(&other), None);
    }

    #[test]
    fn test_destination_for_token_transfer() {
        let token = address!("0x00000000000000000000000000000000000000c0");
        let args = TransferArgs::token(Address::ZERO, Address::repeat_byte(1), U256::from(5), token);
        let (to, value, data) = destination_amount_data(&args);
        assert_eq!(to, token);
        assert_eq!(value, U256::ZERO);
        assert_eq!(parse_erc20_transfer(&data), Some((Address::repeat_byte(1), U256::from(5))));
    }

    #[test]
    fn test_destination_for_native_transfer() {
        let args = TransferArgs::native(Address::ZERO, Address::repeat_byte(1), U256::from(5));
        assert_eq!(
            destination_amount_data(&args),
            (Address::repeat_byte(1), U256::from(5), Bytes::new())
        );
    }
}
