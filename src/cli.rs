use crate::pattern::OrderingPolicy;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Build, check and evaluate RFC 4515 LDAP search filters
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML config file with format and matching rules
    #[arg(long, global = true, env = "LDAP_FILTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// When to color terminal output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Print diagnostics to stderr (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress diagnostics
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a filter and print it in canonical form
    Parse {
        /// Filter string, e.g. "(&(sn=smith)(mail=*))"
        filter: String,

        /// One filter per line
        #[arg(short, long)]
        pretty: bool,

        /// Indent width for pretty output (implies --pretty)
        #[arg(long)]
        indent: Option<usize>,

        /// Indent character for pretty output
        #[arg(long)]
        indent_char: Option<char>,

        /// Collapse redundant single-child groups before printing
        #[arg(short, long)]
        simplify: bool,
    },
    /// Collapse redundant single-child groups
    Simplify {
        filter: String,

        /// Show a line diff of the pretty-printed filter before and after
        #[arg(short, long)]
        diff: bool,
    },
    /// Evaluate a filter against records from a JSON/JSON5 file
    Match {
        filter: String,

        /// File holding one record object or an array of them
        #[arg(short, long)]
        records: PathBuf,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Override how <= and >= compare values
        #[arg(long, value_enum)]
        ordering: Option<OrderingPolicy>,
    },
    /// Escape reserved characters for use in a filter value
    Escape { text: String },
    /// Reverse `escape`
    Unescape { text: String },
}

impl Cli {
    pub fn is_verbose(&self) -> bool {
        self.verbose > 0 && !self.quiet
    }
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
