mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "adr", version, about = "Architecture decision records in Markdown")]
struct Cli {
    /// Directory to resolve the record log from (default: current directory).
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress log output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize a record log and write the first record
    Init {
        /// Doc folder for the records, relative to the root
        directory: Option<String>,
        /// Do not open the new record in an editor
        #[arg(long)]
        no_open: bool,
    },
    /// Create a new record
    New {
        /// Title of the record
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
        /// Number of a record superseded by the new one (repeatable)
        #[arg(short, long = "supersedes", value_name = "NUMBER")]
        supersedes: Vec<u32>,
        /// Link token NUMBER:LINK:REVERSE-LINK (repeatable)
        #[arg(short, long = "link", value_name = "TOKEN")]
        links: Vec<String>,
        /// Do not open the new record in an editor
        #[arg(long)]
        no_open: bool,
    },
    /// Link an existing record to other records
    Link {
        /// Number of the source record
        source: u32,
        /// Link tokens NUMBER:LINK:REVERSE-LINK
        #[arg(required = true, num_args = 1..)]
        tokens: Vec<String>,
    },
    /// List record files
    List {
        #[arg(long)]
        json: bool,
    },
    /// Generate derived documents
    Generate {
        #[command(subcommand)]
        target: GenerateTarget,
    },
    /// Print version information
    Version,
}

#[derive(Subcommand)]
enum GenerateTarget {
    /// Markdown table of contents of all records
    Toc,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Command::Init { directory, no_open } => {
            commands::init(&root, directory.as_deref(), !no_open)
        }
        Command::New {
            title,
            supersedes,
            links,
            no_open,
        } => commands::new_record(&root, &title.join(" "), &supersedes, &links, !no_open),
        Command::Link { source, tokens } => commands::link(&root, source, &tokens),
        Command::List { json } => commands::list(&root, json),
        Command::Generate {
            target: GenerateTarget::Toc,
        } => commands::generate_toc(&root),
        Command::Version => {
            println!("adr {}", adr_core::version());
            Ok(())
        }
    }
}
