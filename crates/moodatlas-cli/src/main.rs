mod cmd_aggregate;
mod cmd_detect;
mod cmd_fallback;
mod cmd_ingest;
mod cmd_policy;
mod cmd_score;
mod input;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use moodatlas_core::{MoodLabel, MoodPolicy};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "moodatlas",
    version,
    about = "Score, classify, and watch the mood of countries"
)]
struct Cli {
    /// Policy YAML overriding the built-in weights and thresholds
    #[arg(long, global = true, env = "MOODATLAS_POLICY")]
    policy: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Aggregate catalog tags into mood features
    Aggregate {
        /// JSON array of {name, count} or {name, weight} (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Score and classify one set of features
    Score {
        #[arg(long)]
        valence: f64,
        #[arg(long)]
        energy: f64,
        #[arg(long, default_value = "0.5")]
        danceability: f64,
        #[arg(long, default_value = "0.5")]
        acousticness: f64,
        /// News sentiment in [-1, 1]
        #[arg(long, allow_hyphen_values = true)]
        sentiment: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify an already computed mood score
    Classify {
        #[arg(long, allow_hyphen_values = true)]
        score: f64,
        #[arg(long)]
        energy: f64,
        #[arg(long)]
        valence: f64,
        #[arg(long, allow_hyphen_values = true)]
        sentiment: Option<f64>,
    },
    /// Check a new score against a country's history for a spike
    Detect {
        /// Country code (e.g. "US")
        #[arg(long)]
        country: String,
        #[arg(long, allow_hyphen_values = true)]
        score: f64,
        /// Label of the new score (Happy, Calm, Sad, Angry, Anxious)
        #[arg(long)]
        label: MoodLabel,
        /// JSON array of {score, label}, oldest first
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Run the daily pipeline over a snapshot of fetched inputs
    Ingest {
        /// Snapshot JSON file
        #[arg(long)]
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the seeded stand-in data for a country
    Fallback {
        /// Country code
        country: String,
    },
    /// Inspect or validate policy files
    Policy {
        #[command(subcommand)]
        cmd: cmd_policy::PolicyCmd,
    },
}

/// Log filter from `MOODATLAS_LOG`, then `RUST_LOG`, else `warn`. Logs go to
/// stderr so command output on stdout stays machine-readable.
fn init_tracing() {
    let filter = std::env::var("MOODATLAS_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".into());
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_policy(path: Option<&Path>) -> anyhow::Result<MoodPolicy> {
    match path {
        Some(p) => {
            debug!(path = %p.display(), "loading policy");
            MoodPolicy::load(p).with_context(|| format!("--policy {}", p.display()))
        }
        None => Ok(MoodPolicy::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let policy_path = cli.policy.as_deref();
    match cli.cmd {
        Command::Aggregate { input } => cmd_aggregate::execute(input.as_deref()),
        Command::Score {
            valence,
            energy,
            danceability,
            acousticness,
            sentiment,
            json,
        } => cmd_score::execute(
            &load_policy(policy_path)?,
            &cmd_score::ScoreParams {
                valence,
                energy,
                danceability,
                acousticness,
                sentiment,
            },
            json,
        ),
        Command::Classify {
            score,
            energy,
            valence,
            sentiment,
        } => cmd_score::classify(&load_policy(policy_path)?, score, energy, valence, sentiment),
        Command::Detect {
            country,
            score,
            label,
            history,
        } => cmd_detect::execute(
            &load_policy(policy_path)?,
            &country,
            score,
            label,
            history.as_deref(),
        ),
        Command::Ingest { input, json } => {
            cmd_ingest::execute(&load_policy(policy_path)?, &input, json)
        }
        Command::Fallback { country } => cmd_fallback::execute(&country),
        Command::Policy { cmd } => cmd_policy::run(cmd, policy_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_score_with_negative_sentiment() {
        let cli = Cli::try_parse_from([
            "moodatlas",
            "score",
            "--valence",
            "0.9",
            "--energy",
            "0.8",
            "--sentiment",
            "-0.4",
        ])
        .unwrap();
        match cli.cmd {
            Command::Score {
                valence,
                danceability,
                sentiment,
                json,
                ..
            } => {
                assert_eq!(valence, 0.9);
                assert_eq!(danceability, 0.5);
                assert_eq!(sentiment, Some(-0.4));
                assert!(!json);
            }
            _ => panic!("expected score"),
        }
    }

    #[test]
    fn parses_detect_label() {
        let cli = Cli::try_parse_from([
            "moodatlas",
            "detect",
            "--country",
            "BR",
            "--score",
            "0.95",
            "--label",
            "happy",
        ])
        .unwrap();
        match cli.cmd {
            Command::Detect {
                country,
                label,
                history,
                ..
            } => {
                assert_eq!(country, "BR");
                assert_eq!(label, MoodLabel::Happy);
                assert!(history.is_none());
            }
            _ => panic!("expected detect"),
        }
    }

    #[test]
    fn rejects_unknown_label() {
        let res = Cli::try_parse_from([
            "moodatlas", "detect", "--country", "BR", "--score", "0.1", "--label", "bored",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn policy_flag_is_global() {
        let cli = Cli::try_parse_from([
            "moodatlas",
            "fallback",
            "JP",
            "--policy",
            "strict.yaml",
        ])
        .unwrap();
        assert_eq!(cli.policy, Some(PathBuf::from("strict.yaml")));
        assert!(matches!(cli.cmd, Command::Fallback { .. }));
    }

    #[test]
    fn ingest_requires_input() {
        assert!(Cli::try_parse_from(["moodatlas", "ingest"]).is_err());
    }

    #[test]
    fn policy_check_subcommand() {
        let cli = Cli::try_parse_from(["moodatlas", "policy", "check", "p.yaml"]).unwrap();
        assert!(matches!(
            cli.cmd,
            Command::Policy {
                cmd: cmd_policy::PolicyCmd::Check { .. }
            }
        ));
    }

    #[test]
    fn missing_policy_file_errors() {
        let err = load_policy(Some(Path::new("/nonexistent/policy.yaml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/policy.yaml"));
        assert_eq!(load_policy(None).unwrap(), MoodPolicy::default());
    }
}
