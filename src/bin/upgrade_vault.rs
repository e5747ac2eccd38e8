// src/bin/upgrade_vault.rs
//! Upgrade a vault in place to the current format — [y/N] prompt + optional verify sweep

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use rpassword::read_password;
use serde_json::json;
use tracing::{info, warn};
use vault_format_upgrade::aliases::MasterKey32;
use vault_format_upgrade::file_ops::decrypt_file;
use vault_format_upgrade::upgrade::FileSelector;
use vault_format_upgrade::{load_config, AesGcmCryptor, ContentCryptor, UpgradeChain, Vault};

const MASTER_KEY_ENV: &str = "VAULT_MASTER_KEY";

#[derive(Debug)]
struct Args {
    vault_path: PathBuf,
    version: u32,
    assume_yes: bool,
    verify: bool,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut args = Args {
        vault_path: PathBuf::new(),
        version: 0,
        assume_yes: false,
        verify: false,
        json: false,
    };

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--yes" | "-y" => args.assume_yes = true,
            "--verify" => args.verify = true,
            "--json" => args.json = true,
            flag if flag.starts_with('-') => bail!("unknown flag {flag}"),
            _ => positional.push(arg),
        }
    }

    let [path, version] = positional.as_slice() else {
        bail!("usage: upgrade_vault <vault-dir> <detected-version> [--yes] [--verify] [--json]");
    };
    args.vault_path = PathBuf::from(path);
    args.version = version
        .parse()
        .with_context(|| format!("vault version must be a number, got {version:?}"))?;
    Ok(args)
}

fn read_master_key() -> Result<MasterKey32> {
    let hex_key = match std::env::var(MASTER_KEY_ENV) {
        Ok(value) => value,
        Err(_) => {
            print!("Master key (64 hex chars): ");
            std::io::stdout().flush()?;
            read_password()?
        }
    };

    let bytes = hex::decode(hex_key.trim()).context("master key is not valid hex")?;
    let key: [u8; 32] = bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("master key must be 32 bytes, got {}", b.len()))?;
    Ok(MasterKey32::new(key))
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(matches!(
        input.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Decrypt every candidate once; returns the number of files that failed
fn verify(vault: &Vault, master_key: MasterKey32) -> Result<u64> {
    let config = load_config();
    let cryptor = AesGcmCryptor::new(master_key);
    let selector = FileSelector::from_pattern(&config.layout.filename_pattern, cryptor.header_size())?;

    let mut failed = 0;
    for candidate in selector.candidates(&vault.data_dir(&config.layout.data_dir))? {
        let candidate = candidate?;
        if let Err(e) = decrypt_file(&candidate.path, &cryptor) {
            failed += 1;
            warn!("FAILED {} — {e}", candidate.path.display());
        }
    }
    Ok(failed)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = parse_args()?;
    let config = load_config();
    let vault = Vault::new(&args.vault_path, args.version);
    let master_key = read_master_key()?;
    let verify_key = MasterKey32::new(*master_key.expose_secret());

    let chain = UpgradeChain::standard(master_key, config)
        .context("Failed to set up upgrade steps — check the filename pattern in the config")?;

    if !chain.needs_upgrade(&vault) {
        println!(
            "Vault {} is already at version {}.",
            vault.path().display(),
            chain.current_version()
        );
        return Ok(());
    }

    for notice in chain.notices(&vault)? {
        println!("{notice}\n");
    }
    if !args.assume_yes && !confirm("Upgrade now?")? {
        println!("Aborted — vault left unchanged.");
        return Ok(());
    }

    let report = chain.upgrade(&vault)?;
    info!("Vault now at version {}", report.reached_version);

    let verify_failures = if args.verify {
        Some(verify(&vault, verify_key)?)
    } else {
        None
    };

    if args.json {
        let out = json!({
            "vault": vault.path().display().to_string(),
            "finished_at": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            "report": report,
            "verify_failures": verify_failures,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("\n=== UPGRADE COMPLETE ===");
        println!("Reached version: {}", report.reached_version);
        for step in &report.steps {
            println!(
                "{} → {}: visited {}, migrated {}, already migrated {}, left behind {}",
                step.source_version,
                step.target_version,
                step.files_visited,
                step.migrated(),
                step.already_migrated,
                step.left_behind()
            );
        }
        if let Some(failed) = verify_failures {
            println!("Verify failures: {failed}");
        }
    }

    if verify_failures.is_some_and(|n| n > 0) {
        bail!("some files failed verification");
    }
    Ok(())
}
