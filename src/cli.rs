//! Command line interface built on clap.
//!
//! Defines [`Cli`] with the [`Command`] subcommands (health, info, evaluate,
//! interactive) and global flags (--base-url, --config, --timeout-secs,
//! --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// NextGen Teacher Evaluation: submit a candidate profile for an AI-powered evaluation.
#[derive(Debug, Parser)]
#[command(name = "teacher-eval", version, about)]
pub struct Cli {
    /// Subcommand to run; an interactive session when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the prediction service.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Enable debug logging on stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check whether the service and its model are ready.
    Health,

    /// Print the service banner.
    Info,

    /// Submit one evaluation and print the result.
    Evaluate {
        /// Position being applied for.
        #[arg(long)]
        job_post: String,

        /// Candidate qualification.
        #[arg(long)]
        qualification: String,

        /// Candidate area of expertise.
        #[arg(long)]
        expertise: String,

        /// Print only the raw result JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Fill in and submit the evaluation form interactively.
    Interactive,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_evaluate_subcommand() {
        let cli = Cli::parse_from([
            "teacher-eval",
            "evaluate",
            "--job-post",
            "Math Teacher",
            "--qualification",
            "MSc Math",
            "--expertise",
            "Calculus",
            "--json",
        ]);
        match cli.command {
            Some(Command::Evaluate {
                job_post,
                qualification,
                expertise,
                json,
            }) => {
                assert_eq!(job_post, "Math Teacher");
                assert_eq!(qualification, "MSc Math");
                assert_eq!(expertise, "Calculus");
                assert!(json);
            }
            other => panic!("expected Evaluate command, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "teacher-eval",
            "--base-url",
            "http://api:8000",
            "--timeout-secs",
            "5",
            "--verbose",
            "health",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.base_url.as_deref(), Some("http://api:8000"));
        assert_eq!(cli.timeout_secs, Some(5));
        assert!(matches!(cli.command, Some(Command::Health)));
    }

    #[test]
    fn cli_defaults_to_no_subcommand() {
        let cli = Cli::parse_from(["teacher-eval"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_evaluate_requires_all_fields() {
        let res = Cli::try_parse_from(["teacher-eval", "evaluate", "--job-post", "x"]);
        assert!(res.is_err());
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
