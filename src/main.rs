use std::io;
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind as ClapErrorKind;
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use pb::{Config, Error, InputEncoding, Result};

/// Protocol Buffers utility
#[derive(Parser, Debug)]
#[command(name = "pb", version)]
struct Cli {
    /// Import paths
    #[arg(
        short = 'I',
        long = "proto_path",
        value_name = "DIR",
        global = true,
        value_delimiter = ','
    )]
    proto_path: Vec<PathBuf>,

    /// Import files
    #[arg(
        short = 'F',
        long = "proto_file",
        value_name = "FILE",
        global = true,
        value_delimiter = ','
    )]
    proto_file: Vec<PathBuf>,

    /// Log diagnostics to stderr; repeat for more detail
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List loaded top-level descriptors
    Ls {
        /// Descriptor types: "files", "messages" or "services"
        #[arg(value_name = "DESCRIPTOR TYPE")]
        categories: Vec<String>,
    },
    /// Decode input from stdin as a JSON string
    Decode {
        /// Input type. "bin" or "base64".
        #[arg(long = "in", value_name = "TYPE", default_value = "bin")]
        input: String,

        /// Fully-qualified message name
        #[arg(value_name = "MESSAGE")]
        message: Option<String>,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => e.exit(),
            _ => {
                eprint!("pb: {}", e);
                process::exit(1);
            }
        },
    };

    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("pb: {}", e);
        process::exit(1);
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let schema = Config::new()
        .includes(&cli.proto_path)
        .files(&cli.proto_file)
        .load()?;

    match cli.command {
        Command::Ls { categories } => pb::list(&schema, &categories, io::stdout().lock()),
        Command::Decode { input, message } => {
            let message =
                message.ok_or_else(|| Error::usage("specify fully-qualified message name"))?;
            pb::decode(
                &schema,
                &message,
                InputEncoding::from_name(&input),
                io::stdin().lock(),
                io::stdout().lock(),
            )
        }
    }
}
