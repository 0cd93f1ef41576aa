//! Subcommand implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{debug, info};

use arcade_state::codec::{StringEnum, decode_name_list_state, parse_json, parse_switchres_output};
use arcade_state::model::{ControlDefRegistry, SwitchResOutput};
use arcade_state::{
    CpDesignerGroupState, CpDesignerState, FileStorage, GameOverrideManagerState,
    MonitorDesignerGroupState, MonitorDesignerState, NameListState, StateCodec, StateSlot,
    StateStore, StoreOptions, clear_state, load_state,
};

use crate::summary::LoadedState;
use crate::{StateKind, StoreArgs, StoreCommand};

fn read_document(file: &Path) -> Result<Value> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let value = parse_json(&text, &file.display().to_string())?;
    Ok(value)
}

fn decode_document(kind: StateKind, file: &Path) -> Result<LoadedState> {
    let value = read_document(file)?;
    let label = kind.slot(arcade_state::constants::SINGLE_DESIGNER_ID).label;
    let state = LoadedState::decode(kind, &value, label)
        .with_context(|| format!("Failed to decode {}", file.display()))?;
    debug!(file = %file.display(), ?kind, "decoded document");
    Ok(state)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn inspect(kind: StateKind, file: &Path, json: bool) -> Result<()> {
    let summary = decode_document(kind, file)?.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}

pub(crate) fn migrate(kind: StateKind, file: &Path) -> Result<()> {
    let state = decode_document(kind, file)?;
    print_json(&state.encode())
}

pub(crate) fn names(file: &Path) -> Result<()> {
    let value = read_document(file)?;
    let state = decode_name_list_state(Some(&value), "sNameListState")
        .with_context(|| format!("Failed to decode {}", file.display()))?;
    for name in state.parse_names() {
        println!("{name}");
    }
    Ok(())
}

pub(crate) fn defs(file: &Path) -> Result<()> {
    let value = read_document(file)?;
    let registry = ControlDefRegistry::decode(&value)
        .with_context(|| format!("Failed to decode {}", file.display()))?;

    println!("{} control definitions", registry.len());
    let missing = registry.missing_types();
    if missing.is_empty() {
        return Ok(());
    }

    let labels: Vec<&str> = missing.iter().map(|t| t.label()).collect();
    bail!(
        "{} control types have no definition: {}",
        labels.len(),
        labels.join(", ")
    );
}

pub(crate) fn modelines(file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let outputs = parse_switchres_output(&text)
        .with_context(|| format!("Failed to decode {}", file.display()))?;

    let mut names: Vec<&String> = outputs.keys().collect();
    names.sort();
    for name in names {
        match &outputs[name] {
            SwitchResOutput::Success(result) => {
                let range = if result.in_range { "" } else { " [out of range]" };
                println!("{name}: {}{range}", result.modeline_str);
            }
            SwitchResOutput::Failure { err } => println!("{name}: error: {err}"),
        }
    }
    Ok(())
}

pub(crate) fn store(args: StoreArgs) -> Result<()> {
    let backend = FileStorage::open(&args.path)?;
    let mut options = StoreOptions::default();
    if let Some(state) = args.initial_state {
        options = options.with_initial_state(state);
    }
    let mut store = StateStore::open(backend, options)
        .with_context(|| format!("Failed to open store: {}", args.path.display()))?;

    match args.command {
        StoreCommand::Get { kind, id } => {
            let slot = kind.slot(&id);
            match load_kind(&mut store, kind, &slot)? {
                Some(state) => print_json(&state.encode())?,
                None => println!("no saved state under '{}'", slot.key),
            }
        }
        StoreCommand::Keys => {
            for key in store.keys()? {
                println!("{key}");
            }
        }
        StoreCommand::Clear { all: true, .. } => {
            store.clear()?;
            info!(path = %args.path.display(), "cleared store");
        }
        StoreCommand::Clear { kind, id, .. } => {
            let Some(kind) = kind else {
                bail!("a state kind or --all is required");
            };
            let slot = kind.slot(&id);
            clear_state(&mut store, &slot)?;
            info!(key = %slot.key, "cleared state");
        }
    }
    Ok(())
}

fn load_kind(
    store: &mut StateStore<FileStorage>,
    kind: StateKind,
    slot: &StateSlot,
) -> Result<Option<LoadedState>> {
    fn load<S: StateCodec>(
        store: &mut StateStore<FileStorage>,
        slot: &StateSlot,
        wrap: fn(S) -> LoadedState,
    ) -> Result<Option<LoadedState>> {
        Ok(load_state::<S, _>(store, slot)?.map(wrap))
    }

    match kind {
        StateKind::CpDesigner => load::<CpDesignerState>(store, slot, LoadedState::CpDesigner),
        StateKind::CpDesignerGroup => {
            load::<CpDesignerGroupState>(store, slot, LoadedState::CpDesignerGroup)
        }
        StateKind::MonitorDesigner => {
            load::<MonitorDesignerState>(store, slot, LoadedState::MonitorDesigner)
        }
        StateKind::MonitorDesignerGroup => {
            load::<MonitorDesignerGroupState>(store, slot, LoadedState::MonitorDesignerGroup)
        }
        StateKind::GameNameList | StateKind::MachineNameList => {
            load::<NameListState>(store, slot, LoadedState::NameList)
        }
        StateKind::GameOverrideManager => {
            load::<GameOverrideManagerState>(store, slot, LoadedState::GameOverrideManager)
        }
    }
}
