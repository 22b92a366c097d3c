//! Verba CLI - inspect, copy and resolve localized messages.
//!
//! # Commands
//!
//! - `verba basenames` - List the basenames of a message store
//! - `verba show <basename>` - Summarize or dump the messages of a basename
//! - `verba transfer` - Copy basenames into a directory, database or zip file
//! - `verba resolve <code>` - Resolve a code through locale fallback and render it

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use verba_core::Locale;
use verba_files::Encoding;

mod commands;
mod error;
mod store;

use commands::{basenames, resolve, show, transfer};
use error::{CliError, CliResult};

/// Verba CLI - locale-fallback message tools
#[derive(Parser)]
#[command(name = "verba")]
#[command(version)]
#[command(about = "Inspect, copy and resolve localized messages")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = format!(
    "{}\n  {} verba basenames --source-dir i18n\n  {} verba show app --source-dir i18n --full\n  {} verba transfer --source-dir i18n --target-zip messages.zip\n  {} verba resolve greeting --source-dir i18n --locale de_AT --arg World",
    "Examples:".bright_cyan().bold(),
    "$".dimmed(),
    "$".dimmed(),
    "$".dimmed(),
    "$".dimmed(),
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the basenames available in a message store
    #[command(alias = "ls")]
    Basenames {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show the messages of one basename
    Show {
        /// Basename to show
        basename: String,

        /// Print every message instead of per-locale counts
        #[arg(long)]
        full: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Copy basenames from a source store into a target store
    #[command(alias = "cp")]
    Transfer(TransferArgs),

    /// Resolve a message code and print the rendered text
    #[command(alias = "r")]
    Resolve(ResolveArgs),
}

/// Where messages are read from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory of .properties files
    #[arg(long, value_name = "DIR", conflicts_with = "source_db", required_unless_present = "source_db")]
    pub source_dir: Option<PathBuf>,

    /// Character encoding of the source directory
    #[arg(long, value_name = "ENCODING", default_value = "ISO-8859-1")]
    pub encoding: Encoding,

    /// Database URL of a message table
    #[arg(long, value_name = "URL")]
    pub source_db: Option<String>,

    /// Table layout (TOML or JSON) for database stores
    #[arg(long, value_name = "FILE")]
    pub table_config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TransferArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Basename to copy (repeatable); all basenames when omitted
    #[arg(short, long = "basename", value_name = "BASENAME")]
    basenames: Vec<String>,

    /// Target directory of .properties files
    #[arg(
        long,
        value_name = "DIR",
        conflicts_with_all = ["target_db", "target_zip"],
        required_unless_present_any = ["target_db", "target_zip"]
    )]
    target_dir: Option<PathBuf>,

    /// Target database URL
    #[arg(long, value_name = "URL", conflicts_with = "target_zip")]
    target_db: Option<String>,

    /// Target zip file
    #[arg(long, value_name = "FILE")]
    target_zip: Option<PathBuf>,

    /// Character encoding of the written files
    #[arg(long, value_name = "ENCODING", default_value = "ISO-8859-1")]
    target_encoding: Encoding,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// Message code to resolve
    code: String,

    #[command(flatten)]
    source: SourceArgs,

    /// Requested locale (base locale when omitted)
    #[arg(short, long, value_name = "LOCALE")]
    locale: Option<Locale>,

    /// Default locale consulted after the requested one
    #[arg(long, value_name = "LOCALE")]
    default_locale: Option<Locale>,

    /// Basename to search, in order (repeatable)
    #[arg(short, long = "basename", value_name = "BASENAME")]
    basenames: Vec<String>,

    /// Print the code itself when no message is found
    #[arg(long)]
    fallback_to_code: bool,

    /// Message argument, in placeholder order (repeatable)
    #[arg(short, long = "arg", value_name = "VALUE", allow_hyphen_values = true)]
    args: Vec<String>,

    /// Message source configuration file (TOML or JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

// ========== Output Helpers ==========

fn success(msg: &str) {
    println!("  {} {}", "✓".green().bold(), msg.green());
}

fn info(msg: &str) {
    println!("  {} {}", "→".cyan(), msg);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    if cli.verbose {
        verba_log::set_level(verba_log::Level::Debug);
    }

    let result: CliResult<()> = match cli.command {
        Commands::Basenames { source } => basenames::run(&source).await,

        Commands::Show { basename, full, source } => show::run(&source, &basename, full).await,

        Commands::Transfer(args) => {
            let target = match (args.target_dir, args.target_db, args.target_zip) {
                (Some(dir), _, _) => Some(transfer::Target::Directory(dir, args.target_encoding)),
                (_, Some(url), _) => Some(transfer::Target::Database(url)),
                (_, _, Some(path)) => Some(transfer::Target::Zip(path, args.target_encoding)),
                (None, None, None) => None,
            };
            match target {
                Some(target) => transfer::run(&args.source, &args.basenames, target).await,
                None => Err(CliError::InvalidArgument("no transfer target given".to_string())),
            }
        }

        Commands::Resolve(args) => {
            let options = resolve::ResolveOptions {
                code: args.code,
                locale: args.locale,
                default_locale: args.default_locale,
                basenames: args.basenames,
                fallback_to_code: args.fallback_to_code,
                args: args.args,
                config: args.config,
            };
            resolve::run(&args.source, options).await
        }
    };

    if let Err(e) = result {
        eprintln!("\n  {} {}\n", "Error:".red().bold(), e);
        std::process::exit(1);
    };
}
