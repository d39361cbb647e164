//! CLI command implementations
//!
//! Every command loads the config, opens the data file, runs one service
//! call and returns the response `data` as JSON. Writes are saved back to
//! the data file before the command returns.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

use crate::api::{ApiError, PasteService};
use crate::entity::Paste;
use crate::mirror::{MirrorTransport, PasteMirror};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::query::QueryParams;
use crate::store::{load_json, save_json, MemoryStore};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Boxed mirror transport a caller may hand to [`boot`]
pub type CliTransport = Box<dyn MirrorTransport + Send + Sync>;

/// Service type every command runs against
pub type FileService = PasteService<MemoryStore<Paste>>;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a command and write its response envelope to stdout
pub fn run_command(cmd: Command) -> CliResult<()> {
    let result = match cmd {
        Command::Init { config } => init(&config),
        Command::Query { config, params } => query(&config, &params.into()),
        Command::Get { config, id } => get(&config, id),
        // No HTTP transport is bundled, so the binary never mirrors
        Command::Add { config } => read_request().and_then(|body| add(&config, body, None)),
        Command::Update { config, id } => read_request().and_then(|body| update(&config, id, body)),
        Command::Delete { config, id } => delete(&config, id),
    };

    match result {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Create an empty data file
pub fn init(config_path: &Path) -> CliResult<Value> {
    let config = load_config(config_path)?;
    let data_path = config.data_path();

    if data_path.exists() {
        return Err(CliError::already_initialized(&config.data_file));
    }

    if let Some(parent) = data_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CliError::io_error(format!("Failed to create directory {:?}: {}", parent, e))
        })?;
    }

    save_json(&MemoryStore::<Paste>::new(), data_path)?;
    log_event_with_fields(Event::StoreSaved, &[("records", "0")]);

    Ok(json!({"initialized": true, "data_file": config.data_file}))
}

/// List pastes
pub fn query(config_path: &Path, params: &QueryParams) -> CliResult<Value> {
    let config = load_config(config_path)?;
    let service = boot(&config, None)?;

    let page = service.get_all(params)?;
    Ok(serde_json::to_value(page)?)
}

/// Fetch one paste
pub fn get(config_path: &Path, id: i64) -> CliResult<Value> {
    let config = load_config(config_path)?;
    let service = boot(&config, None)?;

    Ok(serde_json::to_value(service.get_one(id)?)?)
}

/// Create a paste from a JSON body, optionally mirroring it
pub fn add(config_path: &Path, body: Value, transport: Option<CliTransport>) -> CliResult<Value> {
    let config = load_config(config_path)?;
    let service = boot(&config, transport)?;

    let created = service.create(paste_from(body)?)?;
    persist(&service, &config)?;

    Ok(serde_json::to_value(created)?)
}

/// Replace paste `id` with a JSON body; any id in the body is ignored
pub fn update(config_path: &Path, id: i64, body: Value) -> CliResult<Value> {
    let config = load_config(config_path)?;
    let service = boot(&config, None)?;

    let updated = service.update(paste_from(body)?.with_id(id))?;
    persist(&service, &config)?;

    Ok(serde_json::to_value(updated)?)
}

/// Remove a paste
pub fn delete(config_path: &Path, id: i64) -> CliResult<Value> {
    let config = load_config(config_path)?;
    let service = boot(&config, None)?;

    service.delete(id)?;
    persist(&service, &config)?;

    Ok(json!({"deleted": id}))
}

/// Open the data file and build the service around it
pub fn boot(config: &Config, transport: Option<CliTransport>) -> CliResult<FileService> {
    let data_path = config.data_path();
    if !data_path.exists() {
        return Err(CliError::not_initialized(&config.data_file));
    }

    let store: MemoryStore<Paste> = load_json(data_path)?;
    log_event_with_fields(
        Event::StoreLoaded,
        &[("records", &store.len()?.to_string())],
    );

    let mut service = PasteService::new(store).with_defaults(config.query_defaults());
    if let Some(transport) = transport {
        let mirror = PasteMirror::new(config.mirror_url.clone(), transport).map_err(ApiError::from)?;
        service = service.with_mirror(mirror);
    }

    Ok(service)
}

fn load_config(path: &Path) -> CliResult<Config> {
    let config = Config::load(path)?;
    Logger::set_min_severity(config.severity());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("path", &path.display().to_string())],
    );
    Ok(config)
}

fn persist(service: &FileService, config: &Config) -> CliResult<()> {
    save_json(service.store(), config.data_path())?;
    log_event_with_fields(
        Event::StoreSaved,
        &[("records", &service.store().len()?.to_string())],
    );
    Ok(())
}

fn paste_from(body: Value) -> CliResult<Paste> {
    serde_json::from_value(body).map_err(|e| CliError::invalid_input(format!("Invalid paste: {}", e)))
}
