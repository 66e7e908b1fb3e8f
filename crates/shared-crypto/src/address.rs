//! Account addresses derived from node public keys.
//!
//! `base58check(version || sha256d(compressed_public_key))`, with the version
//! byte selecting the network.

use crate::ecdsa::Secp256k1PublicKey;
use crate::hashing::{sha256d, Hash};
use crate::CryptoError;
use std::fmt;
use std::str::FromStr;

/// Network an address belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    /// Production network.
    MainNet,
    /// Test network.
    TestNet,
}

impl Network {
    /// Base58check version byte.
    pub const fn version(self) -> u8 {
        match self {
            Network::MainNet => 0x00,
            Network::TestNet => 0x6f,
        }
    }

    /// Inverse of [`Network::version`].
    pub fn from_version(version: u8) -> Option<Self> {
        match version {
            0x00 => Some(Network::MainNet),
            0x6f => Some(Network::TestNet),
            _ => None,
        }
    }
}

/// Account address of a request signee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccountAddress {
    network: Network,
    hash: Hash,
}

impl AccountAddress {
    /// Derive the address of `public_key` on `network`.
    pub fn from_public_key(public_key: &Secp256k1PublicKey, network: Network) -> Self {
        Self {
            network,
            hash: sha256d(public_key.as_bytes()),
        }
    }

    /// Network encoded in the address.
    pub fn network(&self) -> Network {
        self.network
    }

    /// 32-byte address payload.
    pub fn hash(&self) -> &Hash {
        &self.hash
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = bs58::encode(self.hash)
            .with_check_version(self.network.version())
            .into_string();
        f.write_str(&encoded)
    }
}

impl FromStr for AccountAddress {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = bs58::decode(s)
            .with_check(None)
            .into_vec()
            .map_err(|e| CryptoError::InvalidAddress(e.to_string()))?;

        // version byte followed by the 32-byte payload
        let Some((&version, payload)) = decoded.split_first() else {
            return Err(CryptoError::InvalidAddress("empty payload".into()));
        };
        let network = Network::from_version(version)
            .ok_or_else(|| CryptoError::InvalidAddress(format!("unknown version {version:#04x}")))?;
        let hash: Hash = payload
            .try_into()
            .map_err(|_| CryptoError::InvalidAddress(format!("payload length {}", payload.len())))?;

        Ok(Self { network, hash })
    }
}
