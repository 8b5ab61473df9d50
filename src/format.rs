//! Formatting of serialized message files.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;
use std::process::{Command, Stdio};

use crate::config::ProjectConfig;
use crate::error::{Error, Result};
use crate::ui::Style;

/// Turns serialized content into its final on-disk form.
pub trait Formatter {
    fn format(&self, content: &str) -> Result<String>;
}

/// Re-indents JSON content. Key order is preserved.
#[derive(Debug, Clone, Copy)]
pub struct JsonFormatter {
    pub indent: usize,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, content: &str) -> Result<String> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| Error::Format(e.to_string()))?;

        let indent = " ".repeat(self.indent);
        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
        value
            .serialize(&mut serializer)
            .map_err(|e| Error::Format(e.to_string()))?;

        let mut formatted = String::from_utf8(buffer).map_err(|e| Error::Format(e.to_string()))?;
        formatted.push('\n');
        Ok(formatted)
    }
}

/// Pipes content through an external program (e.g. `prettier --parser json`).
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    /// Builds a formatter from a command line; `None` when it is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, content: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Format(format!("failed to run {}: {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Format("formatter stdin unavailable".to_string()))?;
        let input = content.to_owned();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Format(e.to_string()))?;
        writer
            .join()
            .map_err(|_| Error::Format("formatter input thread panicked".to_string()))?
            .map_err(|e| Error::Format(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Format(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|e| Error::Format(e.to_string()))
    }
}

/// Picks the formatter configured for the project.
pub fn formatter_for(config: &ProjectConfig) -> Box<dyn Formatter> {
    match config
        .format_command
        .as_deref()
        .and_then(CommandFormatter::from_argv)
    {
        Some(command) => Box::new(command),
        None => Box::new(JsonFormatter::default()),
    }
}

/// Formats `content`, falling back to it unchanged when the formatter fails.
pub fn format_or_original(formatter: &dyn Formatter, content: &str) -> String {
    match formatter.format(content) {
        Ok(formatted) => formatted,
        Err(e) => {
            crate::warn!(
                "{} {e}\nContent was:\n{content}",
                Style::warning("Formatting failed, writing unformatted output:")
            );
            content.to_string()
        }
    }
}
