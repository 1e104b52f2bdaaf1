//! CLI command implementations
//!
//! Boot order for `start` and `invoke`:
//! 1. Configuration load
//! 2. Logger configuration
//! 3. Backend open (file backend replays its log)
//! 4. Dispatcher activation

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use crate::api::{InfoShareHandler, Response};
use crate::observability::{log_event, log_event_with_fields, Event, Logger};
use crate::state::{FileStateStore, MemoryStateStore, StateBackend};

use super::args::Command;
use super::config::{BackendKind, Config};
use super::errors::{CliError, CliResult};
use super::io::{read_requests, write_line};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
        Command::Invoke {
            config,
            function,
            args,
        } => invoke(&config, &function, &args),
    }
}

/// Returns true if `data_dir` holds a state directory
pub fn is_initialized(data_dir: &Path) -> bool {
    data_dir.join(FileStateStore::STATE_DIR).is_dir()
}

/// Initialize a new data directory
///
/// Creates `<data_dir>/state/`. Writes no state.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let data_dir = config.data_path();

    if is_initialized(data_dir) {
        return Err(CliError::AlreadyInitialized(data_dir.to_path_buf()));
    }

    let state_dir = data_dir.join(FileStateStore::STATE_DIR);
    fs::create_dir_all(&state_dir).map_err(|source| CliError::CreateDir {
        path: state_dir.clone(),
        source,
    })?;

    let response = Response::success(br#"{"initialized":true}"#.to_vec());
    write_line(&mut io::stdout().lock(), &response.to_json())
}

/// Boot, then serve request lines from stdin until EOF
pub fn start(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let backend = boot(&config)?;
    let handler = InfoShareHandler::new(backend);

    log_event_with_fields(Event::Serving, &[("data_dir", &config.data_dir)]);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = serve(&handler, stdin.lock(), &mut stdout.lock());

    shutdown(&handler);
    result
}

/// Invoke a single function, print its response, and exit
///
/// An error response is printed like any other, then reported as a failed command.
pub fn invoke(config_path: &Path, function: &str, args: &[String]) -> CliResult<()> {
    let config = load_config(config_path)?;
    let backend = boot(&config)?;
    let handler = InfoShareHandler::new(backend);

    answer(&handler, function, args, &mut io::stdout().lock())
}

/// Writes the response line of one invocation; an error response becomes `CliError::Invoke`
fn answer<B, W>(
    handler: &InfoShareHandler<B>,
    function: &str,
    args: &[String],
    output: &mut W,
) -> CliResult<()>
where
    B: StateBackend + ?Sized,
    W: Write,
{
    let response = handler.invoke(function, args);
    write_line(output, &response.to_json())?;

    match (response.error_code(), response.error_message()) {
        (Some(code), Some(message)) => Err(CliError::Invoke {
            function: function.to_string(),
            code: code.to_string(),
            message: message.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Serving loop: one response line per request line.
///
/// Malformed lines get an error response; a read failure ends the loop.
pub fn serve<B, R, W>(handler: &InfoShareHandler<B>, input: R, output: &mut W) -> CliResult<()>
where
    B: StateBackend + ?Sized,
    R: BufRead,
    W: Write,
{
    for line in read_requests(input) {
        let line = line?;
        let response = handler.handle(&line);
        write_line(output, &response.to_json())?;
    }
    Ok(())
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::configure(config.min_severity()?, config.target()?);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("backend", backend_name(config.backend)),
            ("data_dir", &config.data_dir),
        ],
    );
    Ok(config)
}

/// Opens the configured backend
pub fn boot(config: &Config) -> CliResult<Arc<dyn StateBackend>> {
    log_event(Event::BootStart);

    let backend: Arc<dyn StateBackend> = match config.backend {
        BackendKind::Memory => Arc::new(MemoryStateStore::new()),
        BackendKind::File => {
            let data_dir = config.data_path();
            if !is_initialized(data_dir) {
                return Err(CliError::NotInitialized(data_dir.to_path_buf()));
            }
            let store = FileStateStore::open(data_dir).map_err(CliError::Boot)?;
            Arc::new(store)
        }
    };

    log_event(Event::BootComplete);
    Ok(backend)
}

fn shutdown<B: StateBackend + ?Sized>(handler: &InfoShareHandler<B>) {
    log_event(Event::ShutdownStart);

    let fields = handler.metrics().snapshot().to_fields();
    let borrowed: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    log_event_with_fields(Event::ShutdownComplete, &borrowed);
}

fn backend_name(kind: BackendKind) -> &'static str {
    match kind {
        BackendKind::File => "file",
        BackendKind::Memory => "memory",
    }
}
