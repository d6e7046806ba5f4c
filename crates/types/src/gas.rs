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

use alloy_primitives::U256;

/// Gas fees for a dynamic-fee transaction
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GasFees {
    /// EIP-1559 max fee per gas
    pub max_fee_per_gas: u128,
    /// EIP-1559 max priority fee per gas
    pub max_priority_fee_per_gas: u128,
}

impl GasFees {
    /// Scale both fees to `percent` percent of their current value.
    ///
    /// The max fee is raised to the priority fee if scaling leaves it lower.
    pub fn scale_by_percent(self, percent: u32) -> Self {
        let max_priority_fee_per_gas = scale(self.max_priority_fee_per_gas, percent);
        let max_fee_per_gas = scale(self.max_fee_per_gas, percent).max(max_priority_fee_per_gas);
        Self {
            max_fee_per_gas,
            max_priority_fee_per_gas,
        }
    }
}

/// Take a percentage of a number, saturating on overflow
pub(crate) fn scale(n: u128, percent: u32) -> u128 {
    n.saturating_mul(u128::from(percent)) / 100
}

/// Fee paid by a landed transaction.
///
/// With a tip set this is the lower of `gas_used * (base_fee + tip_cap)` and
/// `gas_used * gas_price`, otherwise it's `gas_used * gas_price`.
pub fn transaction_fee(tip_cap: u128, gas_price: u128, base_fee: u128, gas_used: u64) -> U256 {
    let gas_used = U256::from(gas_used);
    let flat = gas_used * U256::from(gas_price);
    let dynamic = gas_used * (U256::from(base_fee) + U256::from(tip_cap));

    if tip_cap > 0 && dynamic < flat {
        dynamic
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_by_percent() {
        let fees = GasFees {
            max_fee_per_gas: 100,
            max_priority_fee_per_gas: 10,
        };
        assert_eq!(
            fees.scale_by_percent(150),
            GasFees {
                max_fee_per_gas: 150,
                max_priority_fee_per_gas: 15,
            }
        );
    }

    #[test]
    fn test_scale_raises_fee_cap_to_tip() {
        let fees = GasFees {
            max_fee_per_gas: 10,
            max_priority_fee_per_gas: 20,
        };
        let scaled = fees.scale_by_percent(50);
        assert_eq!(scaled.max_priority_fee_per_gas, 10);
        assert_eq!(scaled.max_fee_per_gas, 10);
    }

    #[test]
    fn test_transaction_fee_prefers_dynamic() {
        // (10 + 2) * 100 < 20 * 100
        assert_eq!(transaction_fee(2, 20, 10, 100), U256::from(1200));
    }

    #[test]
    fn test_transaction_fee_without_tip_uses_gas_price() {
        assert_eq!(transaction_fee(0, 20, 10, 100), U256::from(2000));
    }
}
