//! CLI output formatting.
//!
//! Human-readable lines with colored symbols, or one JSON object per line
//! in `--json` mode. Quiet mode suppresses everything but warnings and errors.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::{json, Value};

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Return whether machine-readable JSON output is enabled.
#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Return the global verbosity level from `-v` flags.
#[must_use]
pub fn verbosity() -> u8 {
    read_config().verbose
}

/// Emit `payload` as a JSON line when in JSON mode.
///
/// Returns true when the caller should print nothing else: JSON was
/// emitted, or quiet mode hides regular output.
fn emitted(kind: &str, payload: Value) -> bool {
    let config = read_config();
    if config.json {
        println!("{}", json!({ "type": kind, "payload": payload }));
        return true;
    }
    config.quiet
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    if emitted("header", json!({ "app": "marketcast", "version": version })) {
        return;
    }
    println!("{} {}", "marketcast".bold(), version.dimmed());
    println!();
}

/// Print a section header.
pub fn section(title: &str) {
    if emitted("section", json!({ "title": title })) {
        return;
    }
    println!();
    println!("{}", title.bold());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    if emitted("field", json!({ "label": label, "value": value })) {
        return;
    }
    println!("  {:<12} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    if emitted("success", json!({ "message": message })) {
        return;
    }
    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line. Shown even in quiet mode.
pub fn warning(message: &str) {
    if is_json() {
        emitted("warning", json!({ "message": message }));
        return;
    }
    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

/// Print a hint with "hint:" prefix.
pub fn hint(message: &str) {
    if emitted("hint", json!({ "message": message })) {
        return;
    }
    println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
}

/// Print a reply addressed to the user, with its structured content.
pub fn reply(speaker: &str, text: &str, content: &Value) {
    if emitted(
        "reply",
        json!({ "speaker": speaker, "text": text, "content": content }),
    ) {
        return;
    }
    let mut lines = text.lines();
    if let Some(first) = lines.next() {
        println!("{} {}", format!("{speaker}>").cyan().bold(), first);
    }
    for line in lines {
        println!("  {line}");
    }
    if verbosity() > 0 && !content.is_null() {
        println!("  {}", content.to_string().dimmed());
    }
}

/// Emit a JSON value directly (for commands that need custom JSON output).
pub fn json_output(value: &Value) {
    println!("{value}");
}

/// Pretty-print a JSON value, indented, in human mode.
pub fn json_block(value: &Value) {
    if is_json() {
        json_output(value);
        return;
    }
    if read_config().quiet {
        return;
    }
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    for line in pretty.lines() {
        println!("  {line}");
    }
}
