//! docstyle - Inspect and normalize word-processor stylesheets

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use docstyle::{Result, Stylesheet};

#[derive(Parser)]
#[command(name = "docstyle")]
#[command(version, about = "Inspect and normalize word-processor stylesheets", long_about = None)]
#[command(after_help = "EXAMPLES:
    docstyle dump styles.css                 Show parsed styles and the CSS they produce
    docstyle numbering styles.css on         Turn on heading numbers
    docstyle normalize styles.css -o out.css Rewrite a stylesheet in canonical form
    docstyle rules styles.css --json         Print the flattened rules as JSON")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log what the cascade engine is doing
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print every style with its raw properties, then the generated CSS
    Dump {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
    /// Turn automatic heading numbering on or off and print the result
    Numbering {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[arg(value_enum)]
        state: Switch,
    },
    /// Re-emit a stylesheet with shorthands collapsed and rules merged
    Normalize {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
    /// Print the flattened rules, one entry per full selector
    Rules {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Emit a JSON object instead of CSS text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(quiet: bool, verbose: bool) {
    let default = if quiet {
        "error"
    } else if verbose {
        "docstyle=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<Stylesheet> {
    let bytes = fs::read(path)?;
    Ok(Stylesheet::from_bytes(&bytes))
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Dump { input } => {
            let sheet = load(&input)?;
            print!("{}", sheet.debug_text());
            println!("{}", "=".repeat(80));
            print!("{}", sheet.css_text());
        }
        Command::Numbering { input, state } => {
            let mut sheet = load(&input)?;
            sheet.set_heading_numbering(matches!(state, Switch::On));
            print!("{}", sheet.css_text());
        }
        Command::Normalize { input, output } => {
            let text = load(&input)?.css_text();
            match output {
                Some(path) => fs::write(path, text)?,
                None => print!("{text}"),
            }
        }
        Command::Rules { input, json } => {
            let rules = load(&input)?.rules();
            if json {
                let rules: BTreeMap<&str, BTreeMap<&str, &str>> = rules
                    .iter()
                    .map(|(selector, properties)| (selector.as_str(), properties.iter().collect()))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rules)?);
            } else {
                for (selector, properties) in &rules {
                    println!("{selector} {{ {} }}", properties.serialize());
                }
            }
        }
    }
    Ok(())
}
