//! Output helpers shared by all commands

use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print `value` as JSON, or hand it to `human` for text output.
pub fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    human: impl FnOnce(&T),
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(value)?,
        OutputFormat::Human => human(value),
    }
    Ok(())
}

/// Print a boxed list: a header, one entry per line, or a placeholder.
pub fn print_list<T>(title: &str, items: &[T], render: impl Fn(&T) -> String) {
    println!("┌─ {title}");
    if items.is_empty() {
        println!("│  (none)");
    }
    for (i, item) in items.iter().enumerate() {
        let prefix = if i + 1 == items.len() { "└─" } else { "├─" };
        println!("{prefix} {}", render(item));
    }
}
