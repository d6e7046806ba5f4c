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

use alloy_sol_types::sol;

// From https://github.com/cordialsys/BasicSmartAccount
sol! {
    #[allow(missing_docs)]
    interface IBasicSmartAccount {
        /// `userOps` is the tightly packed call batch, `(r, vs)` the compact
        /// signature over its EIP-712 digest.
        function handleOps(bytes userOps, uint256 r, uint256 vs) external payable;
    }
}
