//! CLI command implementations
//!
//! Each command loads configuration, reads one document, and writes one
//! response object to stdout. The returned value is the process exit code:
//! 0 for success, 2 when validation reported failures.

use std::path::Path;

use serde_json::{json, Value};

use crate::collector::FieldCollector;
use crate::config::EngineConfig;
use crate::edit::{EditService, EditorIdentity};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::schema::ValidationFailure;
use crate::storage::{FileEditStore, MemoryEditStore};
use crate::tenant::FieldJoinKeyRule;

use super::args::{Command, InputArgs};
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_error, write_response};

/// Exit code when the document has validation failures
pub const EXIT_VALIDATION_FAILED: i32 = 2;

/// Who is saving, as given on the command line
#[derive(Debug, Clone, Default)]
pub struct SaveRequest {
    pub editor: String,
    pub user: Option<String>,
    pub client: Option<String>,
    pub tenant: Option<String>,
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<i32> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run a command; failures are reported on stdout before being returned
pub fn run_command(cmd: Command) -> CliResult<i32> {
    let result = match cmd {
        Command::Collect { input } => collect(&input),
        Command::Validate { input } => validate(&input),
        Command::Save {
            input,
            editor,
            user,
            client,
            tenant,
        } => save(
            &input,
            &SaveRequest {
                editor,
                user,
                client,
                tenant,
            },
        ),
    };

    if let Err(err) = &result {
        write_error(err.code_str(), err.message())?;
    }
    result
}

/// Print the editable sections of a document
pub fn collect(input: &InputArgs) -> CliResult<i32> {
    let config = load_config(input.config.as_deref())?;
    let raw = read_input(&input.input)?;

    write_response(collect_response(&config, &raw)?)?;
    Ok(0)
}

/// Validate a document without saving
pub fn validate(input: &InputArgs) -> CliResult<i32> {
    let config = load_config(input.config.as_deref())?;
    let raw = read_input(&input.input)?;

    let (data, code) = validate_response(&config, &raw)?;
    write_response(data)?;
    Ok(code)
}

/// Validate a document and save it into the configured data directory
pub fn save(input: &InputArgs, request: &SaveRequest) -> CliResult<i32> {
    let config = load_config(input.config.as_deref())?;
    let raw = read_input(&input.input)?;

    let (data, code) = save_response(&config, &raw, request)?;
    write_response(data)?;
    Ok(code)
}

/// Load configuration and apply its log level
pub fn load_config(path: Option<&Path>) -> CliResult<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    Logger::set_min_severity(config.log_severity());

    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("source", source.as_str()), ("log_level", config.log_level.as_str())],
    );

    Ok(config)
}

/// `{"records": [...]}` for a raw document
pub fn collect_response(config: &EngineConfig, raw: &str) -> CliResult<Value> {
    let document: Value = serde_json::from_str(raw)
        .map_err(|e| CliError::invalid_input(e.to_string()))?;
    let records = FieldCollector::new(&config.collector).collect_document(&document);

    Ok(json!({ "records": records }))
}

/// `{"valid": bool, "failures": [...]}` and the exit code
pub fn validate_response(config: &EngineConfig, raw: &str) -> CliResult<(Value, i32)> {
    let store = MemoryEditStore::new();
    let service = EditService::new(&config.collector, &store, &FieldJoinKeyRule);

    let failures = service.validate_edited_details(raw)?;
    let code = exit_code(&failures);

    Ok((
        json!({ "valid": failures.is_empty(), "failures": failures }),
        code,
    ))
}

/// `{"saved": bool, "failures": [...]}` and the exit code
pub fn save_response(
    config: &EngineConfig,
    raw: &str,
    request: &SaveRequest,
) -> CliResult<(Value, i32)> {
    let store = FileEditStore::open(&config.data_dir)?;
    let service = EditService::new(&config.collector, &store, &FieldJoinKeyRule);

    let mut tenant = config.tenant.clone();
    if let Some(tenant_id) = &request.tenant {
        tenant = tenant.with_tenant_id(tenant_id.as_str());
    }

    let editor = EditorIdentity::new(
        request.editor.as_str(),
        request.user.as_deref().unwrap_or(&request.editor),
        request
            .client
            .as_deref()
            .unwrap_or(&config.default_client_type),
    );

    let failures = service.save_edited_details(raw, &tenant, &editor)?;
    let code = exit_code(&failures);

    Ok((
        json!({ "saved": failures.is_empty(), "failures": failures }),
        code,
    ))
}

fn exit_code(failures: &[ValidationFailure]) -> i32 {
    if failures.is_empty() {
        0
    } else {
        EXIT_VALIDATION_FAILED
    }
}
