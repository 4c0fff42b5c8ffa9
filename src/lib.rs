//! Build, parse, serialize, simplify and evaluate LDAP search filters in the
//! RFC 4515 text syntax, e.g. `(&(sn=smith)(mail=*))`.

pub mod cli;
pub mod config;
pub mod escape;
pub mod filter;
pub mod pattern;
pub mod records;
pub mod report;

pub use cli::{ColorMode, Commands, OutputFormat, cli_parse};
pub use escape::{decode_value, escape, unescape};
pub use filter::{
    Attribute, Comparison, ConstructionError, Filter, FilterError, FormatOptions, Group,
    GroupKind, Operator, ParseError, ParseErrorKind, parse,
};
pub use pattern::{AttributeValue, Entry, MatchOptions, OrderingPolicy, Record, Scalar};

use anyhow::Context;
use colored::Colorize;

fn parse_filter_arg(input: &str) -> anyhow::Result<Filter> {
    parse(input).with_context(|| format!("Invalid filter expression: {input}"))
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    let config = config::load_config(cli.config.as_deref()).context("Failed to load config")?;
    let verbose = cli.is_verbose();

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    if verbose {
        eprintln!("Verbosity level: {}", cli.verbose);
        eprintln!("Color mode: {:?}", cli.color);
        match &cli.config {
            Some(path) => eprintln!("Config file: {}", path.display()),
            None => eprintln!("Config file: <defaults>"),
        }
        if cli.verbose > 1 {
            eprintln!("Config: {:?}", config);
        }
    }

    match &cli.command {
        Commands::Parse {
            filter,
            pretty,
            indent,
            indent_char,
            simplify,
        } => {
            let mut parsed = parse_filter_arg(filter)?;
            if *simplify {
                parsed = parsed.simplify();
            }

            let mut options = config.format.to_options();
            if *pretty && options.is_compact() {
                options = options
                    .indent(config.format.indent_width.max(1))
                    .indent_char(config.format.indent_char);
            }
            if let Some(width) = indent {
                options = options.indent(*width);
            }
            if let Some(c) = indent_char {
                options = options.indent_char(*c);
            }

            println!("{}", parsed.to_string_with(&options));
        }
        Commands::Simplify { filter, diff } => {
            let parsed = parse_filter_arg(filter)?;
            let simplified = parsed.simplified();

            if verbose && simplified == parsed {
                eprintln!("Filter is already simplified");
            }

            if *diff {
                let options = FormatOptions::pretty()
                    .indent(config.format.indent_width.max(1))
                    .indent_char(config.format.indent_char);
                print!(
                    "{}",
                    report::compute_text_diff(
                        &parsed.to_string_with(&options),
                        &simplified.to_string_with(&options)
                    )
                );
            } else {
                println!("{}", simplified.to_string_with(&config.format.to_options()));
            }
        }
        Commands::Match {
            filter,
            records: records_path,
            format,
            ordering,
        } => {
            let parsed = parse_filter_arg(filter)?;
            let entries = records::load_records(records_path)?;

            let mut options = config.matching.to_options();
            if let Some(ordering) = ordering {
                options = options.ordering(*ordering);
            }

            if verbose {
                eprintln!("Filter: {}", parsed);
                eprintln!(
                    "Loaded {} records from {}",
                    entries.len(),
                    records_path.display()
                );
                eprintln!("Ordering: {:?}", options.ordering);
            }

            let result = report::evaluate_records(&parsed, &entries, &options);
            match format {
                OutputFormat::Text => print!("{}", report::format_report_text(&result, &entries)),
                OutputFormat::Json => println!("{}", report::format_report_json(&result)),
            }

            if result.matched.is_empty() && !cli.quiet {
                eprintln!("{}", "No records match the filter".yellow());
            }
        }
        Commands::Escape { text } => println!("{}", escape(text)),
        Commands::Unescape { text } => println!("{}", unescape(text)),
    }

    Ok(())
}
