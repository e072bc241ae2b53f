// src/bin/filecrypt.rs
//! Interactive operator menu: generate, send and list keys, encrypt/decrypt files

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use filecrypt::{
    collect_files, load_config, send_file, BatchProcessor, CipherMode, Config, KeyAlgorithm,
    KeyDeriver, KeyStore, PassphraseSource, RemoteTarget, TerminalPrompt,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const MENU: &str = "
==============================
filecrypt
==============================
1. Generate a key
2. Send a key over SFTP
3. Encrypt files
4. Decrypt files
5. List saved keys
6. Quit
";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = load_config().context("Failed to load configuration")?;
    info!(key_dir = %config.paths.key_dir.display(), "filecrypt started");

    loop {
        println!("{MENU}");
        let choice = ask("Choice: ")?;

        let outcome = match choice.as_str() {
            "1" => generate_key(&config),
            "2" => send_key(),
            "3" => run_batch(&config, CipherMode::Encrypt),
            "4" => run_batch(&config, CipherMode::Decrypt),
            "5" => list_keys(&config),
            "6" | "q" | "quit" => break,
            _ => {
                println!("Please enter a number between 1 and 6");
                continue;
            }
        };

        if let Err(e) = outcome {
            error!("{e:#}");
            println!("✗ {e:#}");
        }
    }

    Ok(())
}

fn ask(prompt: &str) -> Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_owned())
}

fn generate_key(config: &Config) -> Result<()> {
    let algorithm: KeyAlgorithm = ask("Algorithm (AES/PBKDF2): ")?.parse()?;
    let length_bits: u32 = ask("Length (128/192/256): ")?
        .parse()
        .context("Length must be a number")?;

    let key = KeyDeriver::from_config(config).generate(
        algorithm,
        length_bits,
        &TerminalPrompt::default(),
    )?;
    let path = KeyStore::from_config(config)
        .save(&key)
        .context("Failed to save key")?;

    println!("✓ Key saved: {}", path.display());
    Ok(())
}

fn send_key() -> Result<()> {
    let local = ask("Local key path: ")?;
    let host = ask("Host: ")?;
    let username = ask("Username: ")?;
    let password = TerminalPrompt::new("Password: ").read_passphrase()?;
    let remote_path = ask("Remote path: ")?;

    let target = RemoteTarget::new(&host, username, remote_path)?;
    let sent = send_file(Path::new(&local), &target, &password)
        .with_context(|| format!("SFTP transfer to {target} failed"))?;

    println!("✓ Sent {sent} bytes to {target}");
    Ok(())
}

fn select_targets() -> Result<Vec<PathBuf>> {
    println!("[1] Single file");
    println!("[2] Whole directory");
    let target = match ask("Choice: ")?.as_str() {
        "1" => ask("File path: ")?,
        "2" => ask("Directory path: ")?,
        _ => return Ok(Vec::new()),
    };
    collect_files(&target).with_context(|| format!("Cannot select {target}"))
}

fn run_batch(config: &Config, mode: CipherMode) -> Result<()> {
    let key_path = ask("Key path: ")?;
    let key = KeyStore::from_config(config)
        .load(&key_path)
        .with_context(|| format!("Failed to load key {key_path}"))?;

    let files = select_targets()?;
    if files.is_empty() {
        println!("No files selected.");
        return Ok(());
    }

    println!("{mode}ing {} file(s)...", files.len());
    let pb = make_progress_bar(files.len() as u64);
    let report = BatchProcessor::from_config(config).run_with_progress(&files, &key, mode, |p| {
        pb.set_position(p.processed as u64);
    });
    pb.finish_and_clear();

    for failure in report.failures() {
        if let Some(e) = failure.error() {
            println!("✗ {}: {e}", failure.path.display());
        }
    }
    println!(
        "✓ Done: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
    Ok(())
}

fn list_keys(config: &Config) -> Result<()> {
    let store = KeyStore::from_config(config);
    let keys = store.list()?;
    if keys.is_empty() {
        println!("No keys in {}", store.root().display());
    }
    for path in keys {
        println!("  {}", path.display());
    }
    Ok(())
}

fn make_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}
