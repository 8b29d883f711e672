use clap::Subcommand;
use moodatlas_core::MoodPolicy;
use std::path::{Path, PathBuf};

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum PolicyCmd {
    /// Print the effective policy (defaults merged with --policy) as YAML
    Show,
    /// Validate a policy file
    Check {
        /// Policy YAML file
        file: PathBuf,
    },
}

// ── Dispatch ──

pub fn run(cmd: PolicyCmd, policy: Option<&Path>) -> anyhow::Result<()> {
    match cmd {
        PolicyCmd::Show => show(policy),
        PolicyCmd::Check { file } => check(&file),
    }
}

// ── Command Implementations ──

fn effective(policy: Option<&Path>) -> anyhow::Result<MoodPolicy> {
    match policy {
        Some(p) => MoodPolicy::load(p),
        None => Ok(MoodPolicy::default()),
    }
}

/// `moodatlas policy show`
pub fn show(policy: Option<&Path>) -> anyhow::Result<()> {
    print!("{}", effective(policy)?.to_yaml()?);
    Ok(())
}

/// `moodatlas policy check <file>`
pub fn check(file: &Path) -> anyhow::Result<()> {
    MoodPolicy::load(file)?;
    println!("{}: ok", file.display());
    Ok(())
}
