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

use alloy_primitives::{Address, Signature, B256};
use alloy_signer::Signer;
use alloy_signer_local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};
use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};

use crate::{manager::DigestSigner, Result};

pub(crate) fn construct_signers_from_private_keys(
    private_keys: &[SecretString],
) -> Result<Vec<PrivateKeySigner>> {
    private_keys
        .iter()
        .map(|private_key| -> Result<PrivateKeySigner> {
            Ok(private_key
                .expose_secret()
                .parse::<PrivateKeySigner>()
                .context("failed to parse private key signer")?)
        })
        .collect()
}

pub(crate) fn construct_signers_from_mnemonic(
    mnemonic: &SecretString,
    count: usize,
) -> Result<Vec<PrivateKeySigner>> {
    let builder = MnemonicBuilder::<English>::default().phrase(mnemonic.expose_secret());

    (0..count)
        .map(|i| -> Result<PrivateKeySigner> {
            let index = u32::try_from(i).context("mnemonic index out of range")?;
            Ok(builder.clone().index(index)?.build()?)
        })
        .collect()
}

#[async_trait::async_trait]
impl DigestSigner for PrivateKeySigner {
    fn address(&self) -> Address {
        Signer::address(self)
    }

    async fn sign_digest(&self, digest: &B256) -> Result<Signature> {
        Ok(self.sign_hash(digest).await?)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";

    #[test]
    fn test_signers_from_private_keys() {
        let keys = vec![SecretString::from(
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".to_string(),
        )];
        let signers = construct_signers_from_private_keys(&keys).unwrap();
        assert_eq!(
            DigestSigner::address(&signers[0]),
            address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }

    #[test]
    fn test_bad_private_key() {
        let keys = vec![SecretString::from("not a key".to_string())];
        assert!(construct_signers_from_private_keys(&keys).is_err());
    }

    #[test]
    fn test_signers_from_mnemonic() {
        let mnemonic = SecretString::from(TEST_MNEMONIC.to_string());
        let signers = construct_signers_from_mnemonic(&mnemonic, 2).unwrap();
        assert_eq!(
            signers.iter().map(DigestSigner::address).collect::<Vec<_>>(),
            vec![
                address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
                address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"),
            ]
        );
    }
}
