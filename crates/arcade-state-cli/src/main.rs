//! Command-line tool for inspecting and migrating persisted designer state.
//!
//! # Usage
//!
//! ```bash
//! # Summarize a saved control panel designer state
//! arcade-state inspect cp-designer state.json
//!
//! # Print the latest-version form of an old monitor designer group state
//! arcade-state migrate monitor-designer-group old.json
//!
//! # List calculated modelines by machine
//! arcade-state modelines output.json
//!
//! # Read a component from a file-backed store, migrating deprecated keys
//! arcade-state store --path store.json get game-name-list
//! ```

mod commands;
mod summary;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arcade_state::StateSlot;
use arcade_state::constants::SINGLE_DESIGNER_ID;

/// Inspect, migrate and validate arcade designer state documents
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a state document and print a summary
    Inspect(InspectArgs),
    /// Decode a state document and print it in the latest version
    Migrate(DocumentArgs),
    /// Print the names of a game or machine name list document
    Names(FileArgs),
    /// Validate a control definition dataset
    Defs(FileArgs),
    /// Print the results of a modeline calculator output document
    Modelines(FileArgs),
    /// Operate on a file-backed state store
    Store(StoreArgs),
}

#[derive(Args, Debug)]
struct DocumentArgs {
    /// Kind of state the document holds
    #[arg(value_enum)]
    kind: StateKind,

    /// JSON document
    file: PathBuf,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    document: DocumentArgs,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct FileArgs {
    /// JSON document
    file: PathBuf,
}

#[derive(Args, Debug)]
struct StoreArgs {
    /// Store file
    #[arg(long, value_name = "FILE")]
    path: PathBuf,

    /// JSON object seeding the session cache, as carried by a shared URL
    #[arg(long, value_name = "JSON")]
    initial_state: Option<String>,

    #[command(subcommand)]
    command: StoreCommand,
}

#[derive(Subcommand, Debug)]
enum StoreCommand {
    /// Load a component's state and print it in the latest version
    Get {
        #[arg(value_enum)]
        kind: StateKind,

        /// Designer ID, for per-designer state
        #[arg(long, default_value = SINGLE_DESIGNER_ID)]
        id: String,
    },
    /// List stored keys
    Keys,
    /// Remove one component's state, or everything with --all
    Clear {
        #[arg(value_enum, required_unless_present = "all")]
        kind: Option<StateKind>,

        /// Designer ID, for per-designer state
        #[arg(long, default_value = SINGLE_DESIGNER_ID)]
        id: String,

        /// Clear the whole store
        #[arg(long)]
        all: bool,
    },
}

/// Kind of component state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StateKind {
    CpDesigner,
    CpDesignerGroup,
    MonitorDesigner,
    MonitorDesignerGroup,
    GameNameList,
    MachineNameList,
    GameOverrideManager,
}

impl StateKind {
    fn slot(self, id: &str) -> StateSlot {
        match self {
            StateKind::CpDesigner => StateSlot::cp_designer(id),
            StateKind::CpDesignerGroup => StateSlot::cp_designer_group(),
            StateKind::MonitorDesigner => StateSlot::monitor_designer(id),
            StateKind::MonitorDesignerGroup => StateSlot::monitor_designer_group(),
            StateKind::GameNameList => StateSlot::game_name_list(),
            StateKind::MachineNameList => StateSlot::machine_name_list(),
            StateKind::GameOverrideManager => StateSlot::game_override_manager(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Inspect(args) => commands::inspect(args.document.kind, &args.document.file, args.json),
        Command::Migrate(args) => commands::migrate(args.kind, &args.file),
        Command::Names(args) => commands::names(&args.file),
        Command::Defs(args) => commands::defs(&args.file),
        Command::Modelines(args) => commands::modelines(&args.file),
        Command::Store(args) => commands::store(args),
    }
}
