//! Ring signature CLI
//!
//! Command-line interface for Schnorr ring signatures:
//! - Key generation
//! - Ring assembly
//! - Signing and verification

mod files;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ringsig_core::{keygen, sign, verify, PublicKey, Ring};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn, Level};

/// ringsig - anonymous signatures on behalf of a group of keys
#[derive(Parser)]
#[command(name = "ringsig")]
#[command(about = "Schnorr ring signatures over secp256k1")]
#[command(version)]
struct Cli {
    /// Directory holding key files
    #[arg(short, long, env = "RINGSIG_DIR", default_value = "./keys")]
    dir: PathBuf,

    /// Emit logs as JSON
    #[arg(long, env = "RINGSIG_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a key pair
    Keygen {
        /// Name of the key file to create
        #[arg(short, long)]
        name: String,
    },

    /// Assemble an ordered ring from public keys
    Ring {
        /// Output ring file
        #[arg(short, long)]
        out: PathBuf,

        /// Hex-encoded public keys, in ring order
        #[arg(required = true, num_args = 2..)]
        keys: Vec<String>,
    },

    /// Sign a message on behalf of a ring
    Sign {
        /// Name of the signer's key file
        #[arg(short, long)]
        key: String,

        /// Ring file
        #[arg(short, long)]
        ring: PathBuf,

        /// Message to sign
        #[arg(short, long)]
        message: String,

        /// Output signature file
        #[arg(short, long, default_value = "signature.json")]
        out: PathBuf,
    },

    /// Verify a ring signature
    Verify {
        /// Signature file
        #[arg(short, long)]
        signature: PathBuf,

        /// Message that was signed
        #[arg(short, long)]
        message: String,

        /// Ring file to verify against (defaults to the ring in the signature)
        #[arg(short, long)]
        ring: Option<PathBuf>,
    },

    /// Show a key file's public key
    Info {
        /// Name of the key file
        #[arg(short, long)]
        key: String,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Commands::Keygen { ref name } => run_keygen(&cli, name)?,
        Commands::Ring { ref out, ref keys } => run_ring(out, keys)?,
        Commands::Sign {
            ref key,
            ref ring,
            ref message,
            ref out,
        } => run_sign(&cli, key, ring, message, out)?,
        Commands::Verify {
            ref signature,
            ref message,
            ref ring,
        } => {
            if !run_verify(signature, message, ring.as_deref())? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Info { ref key } => show_info(&cli, key)?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Logs go to stderr so stdout stays machine-readable
fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run_keygen(cli: &Cli, name: &str) -> Result<()> {
    std::fs::create_dir_all(&cli.dir)?;

    let path = files::key_path(&cli.dir, name);
    if path.exists() {
        anyhow::bail!("key file {} already exists", path.display());
    }

    let key_pair = keygen::generate_default()?;
    files::write_key(&path, &key_pair)?;

    info!(
        public_key = %key_pair.public.to_hex(),
        path = ?path,
        "Key pair generated"
    );

    println!("{}", key_pair.public.to_hex());

    Ok(())
}

fn run_ring(out: &Path, keys: &[String]) -> Result<()> {
    let ring = parse_ring(keys)?;
    files::write_ring(out, &ring)?;

    info!(size = ring.len(), path = ?out, "Ring written");

    Ok(())
}

fn parse_ring(keys: &[String]) -> Result<Ring> {
    keys.iter()
        .enumerate()
        .map(|(i, hex)| {
            PublicKey::from_hex(hex).with_context(|| format!("invalid public key #{}", i))
        })
        .collect()
}

fn run_sign(cli: &Cli, key: &str, ring: &Path, message: &str, out: &Path) -> Result<()> {
    let key_pair = files::read_key(&files::key_path(&cli.dir, key))?;
    let ring = files::read_ring(ring)?;

    let index = ring
        .position(&key_pair.public)
        .context("signer's public key is not a member of the ring")?;

    info!(ring_size = ring.len(), "Signing message");

    let signature = sign::sign_default(message.as_bytes(), &ring, index, &key_pair.private)?;
    files::write_signature(out, &signature)?;

    info!(path = ?out, "Signature written");

    Ok(())
}

fn run_verify(signature: &Path, message: &str, ring: Option<&Path>) -> Result<bool> {
    let signature = files::read_signature(signature)?;

    let valid = match ring {
        Some(path) => verify(message.as_bytes(), &files::read_ring(path)?, &signature),
        None => signature.verify(message.as_bytes()),
    };

    if valid {
        info!("Signature is valid");
        println!("valid");
    } else {
        warn!("Signature is invalid");
        println!("invalid");
    }

    Ok(valid)
}

fn show_info(cli: &Cli, key: &str) -> Result<()> {
    let key_pair = files::read_key(&files::key_path(&cli.dir, key))?;

    println!("Key Info:");
    println!("  Name: {}", key);
    println!("  Public Key: {}", key_pair.public.to_hex());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use ringsig_core::keygen::generate_default;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sign_args() {
        let cli = Cli::try_parse_from([
            "ringsig", "--dir", "/tmp/k", "sign", "--key", "bob", "--ring", "ring.json",
            "--message", "hello",
        ])
        .unwrap();

        assert_eq!(cli.dir, PathBuf::from("/tmp/k"));
        match cli.command {
            Commands::Sign { key, message, out, .. } => {
                assert_eq!(key, "bob");
                assert_eq!(message, "hello");
                assert_eq!(out, PathBuf::from("signature.json"));
            }
            _ => panic!("expected sign"),
        }
    }

    #[test]
    fn test_ring_needs_two_keys() {
        let result = Cli::try_parse_from(["ringsig", "ring", "--out", "r.json", "02ab"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_ring_reports_bad_key() {
        let good = generate_default().unwrap().public.to_hex();
        let err = parse_ring(&[good, "zz".into()]).unwrap_err();
        assert!(err.to_string().contains("#1"));
    }

    #[test]
    fn test_sign_then_verify_files() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            dir: dir.path().to_path_buf(),
            log_json: false,
            command: Commands::Info { key: String::new() },
        };

        run_keygen(&cli, "alice").unwrap();
        run_keygen(&cli, "bob").unwrap();
        assert!(run_keygen(&cli, "bob").is_err());

        let alice = files::read_key(&files::key_path(&cli.dir, "alice")).unwrap();
        let bob = files::read_key(&files::key_path(&cli.dir, "bob")).unwrap();

        let ring_path = dir.path().join("ring.json");
        run_ring(&ring_path, &[alice.public.to_hex(), bob.public.to_hex()]).unwrap();

        let sig_path = dir.path().join("sig.json");
        run_sign(&cli, "bob", &ring_path, "hello", &sig_path).unwrap();

        assert!(run_verify(&sig_path, "hello", Some(ring_path.as_path())).unwrap());
        assert!(run_verify(&sig_path, "hello", None).unwrap());
        assert!(!run_verify(&sig_path, "goodbye", None).unwrap());

        let reversed = dir.path().join("reversed.json");
        run_ring(&reversed, &[bob.public.to_hex(), alice.public.to_hex()]).unwrap();
        assert!(!run_verify(&sig_path, "hello", Some(reversed.as_path())).unwrap());
    }

    #[test]
    fn test_sign_requires_ring_membership() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            dir: dir.path().to_path_buf(),
            log_json: false,
            command: Commands::Info { key: String::new() },
        };
        run_keygen(&cli, "mallory").unwrap();

        let ring_path = dir.path().join("ring.json");
        let outsiders: Vec<String> = (0..2)
            .map(|_| generate_default().unwrap().public.to_hex())
            .collect();
        run_ring(&ring_path, &outsiders).unwrap();

        let err = run_sign(&cli, "mallory", &ring_path, "m", &dir.path().join("s.json"))
            .unwrap_err();
        assert!(err.to_string().contains("not a member"));
    }
}
