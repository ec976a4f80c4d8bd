//! Key, ring and signature files
//!
//! All files are pretty-printed JSON with hex-encoded points and scalars.

use anyhow::{Context, Result};
use ringsig_core::{KeyPair, PrivateKey, PublicKey, Ring, Signature};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// On-disk form of a key pair
#[derive(Serialize, Deserialize)]
pub struct KeyFile {
    pub public_key: PublicKey,
    pub private_key: Zeroizing<String>,
}

impl KeyFile {
    pub fn from_key_pair(key_pair: &KeyPair) -> Self {
        Self {
            public_key: key_pair.public.clone(),
            private_key: Zeroizing::new(hex::encode(key_pair.private.to_bytes())),
        }
    }

    /// Decode the key pair, checking that both halves belong together
    pub fn into_key_pair(self) -> Result<KeyPair> {
        let bytes = Zeroizing::new(
            hex::decode(self.private_key.as_str()).context("private key is not hex")?,
        );
        let private = PrivateKey::from_bytes(&bytes)?;
        if private.public_key() != self.public_key {
            anyhow::bail!("public key does not match private key");
        }
        Ok(KeyPair {
            public: self.public_key,
            private,
        })
    }
}

/// Path of the key file for `name` inside `dir`
pub fn key_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.key.json", name))
}

/// Write a key file readable by its owner only
pub fn write_key(path: &Path, key_pair: &KeyPair) -> Result<()> {
    let json = Zeroizing::new(serde_json::to_string_pretty(&KeyFile::from_key_pair(key_pair))?);

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    options
        .open(path)
        .and_then(|mut file| file.write_all(json.as_bytes()))
        .with_context(|| format!("failed to write {}", path.display()))
}

pub fn read_key(path: &Path) -> Result<KeyPair> {
    let file: KeyFile = read_json(path)?;
    file.into_key_pair()
        .with_context(|| format!("invalid key file {}", path.display()))
}

pub fn read_ring(path: &Path) -> Result<Ring> {
    read_json(path)
}

pub fn write_ring(path: &Path, ring: &Ring) -> Result<()> {
    write_json(path, ring)
}

pub fn read_signature(path: &Path) -> Result<Signature> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Signature::from_json(&json).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn write_signature(path: &Path, signature: &Signature) -> Result<()> {
    std::fs::write(path, signature.to_json()?)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("failed to parse {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
