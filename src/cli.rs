use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Aggregate license information of release attachments and render disclosure documents
#[derive(Parser, Debug)]
#[command(name = "license-info")]
#[command(version)]
#[command(
    about = "Aggregate license information of release attachments and render disclosure documents",
    long_about = None
)]
pub struct Args {
    /// Path to a config file (defaults to ./license-info.config.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Act as this user instead of the one named in the manifest
    #[arg(long, global = true, value_name = "EMAIL")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a license information file for the selected attachments of a project
    Generate {
        /// Project manifest (TOML)
        #[arg(short, long, value_name = "FILE")]
        manifest: PathBuf,

        /// Output generator id, e.g. TextGenerator::DISCLOSURE
        #[arg(short, long, value_name = "ID")]
        generator: String,

        /// Output file path (if not specified, text formats are written to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List the available output formats
    Formats,

    /// Print the parsing results of one attachment as JSON
    Inspect {
        /// Project manifest (TOML)
        #[arg(short, long, value_name = "FILE")]
        manifest: PathBuf,

        /// Release id owning the attachment
        #[arg(short, long, value_name = "ID")]
        release: String,

        /// Attachment content id
        #[arg(short, long, value_name = "ID")]
        attachment: String,
    },

    /// Print the default license info header
    Header,
}
