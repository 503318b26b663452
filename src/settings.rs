use crate::render_messages::render_errors::{ErrorMetaDataKey, RenderError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "beamview.toml";
pub const DEBUG_INFO_FILE_EXTENSION: &str = "json";

// Rendering conventions
pub const PIN_MARKER: char = '^';
pub const IGNORE_NAME: &str = "_";
pub const ELIXIR_ALIAS_PREFIX: &str = "Elixir.";

// Sentinel texts substituted for malformed payloads
pub const UNKNOWN_NAME: &str = "unknown_name";
pub const UNKNOWN_PARAMETER_RETURN: &str = "unknown_parameter_return";
pub const UNKNOWN_ABSTRACT_CODE: &str = "unknown_abstract_code";
pub const UNKNOWN_TYPE: &str = "unknown_type";
pub const UNKNOWN_STRING: &str = "unknown_string";
pub const UNKNOWN_OPERATOR: &str = "unknown_operator";
pub const UNKNOWN_CLAUSES: &str = "unknown_clauses";
pub const UNKNOWN_FUNCTION_NAME: &str = "unknown_function_name";
pub const UNKNOWN_MODULE: &str = "unknown_module";

// A rough guess for output buffer size per form, avoids early reallocations
pub const BYTES_PER_FORM: usize = 96;

/// User-facing options for how the rendering is laid out.
/// Loaded from `beamview.toml` when present, every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Spaces per nesting level
    pub indent_width: usize,

    /// Emit a `# line N` comment above each function and attribute
    pub emit_line_comments: bool,

    /// Separate top level forms with an empty line
    pub blank_line_between_forms: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            indent_width: 2,
            emit_line_comments: false,
            blank_line_between_forms: true,
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(source: &str) -> Result<RenderConfig, RenderError> {
        toml::from_str(source).map_err(|e| {
            let mut error = RenderError::config_error(e.to_string());
            error.new_metadata_entry(
                ErrorMetaDataKey::PrimarySuggestion,
                "supported keys are indent_width, emit_line_comments, blank_line_between_forms",
            );
            error
        })
    }

    pub fn load(path: &Path) -> Result<RenderConfig, RenderError> {
        let source = fs::read_to_string(path)
            .map_err(|e| RenderError::file_error(path, format!("Could not read config: {e}")))?;

        RenderConfig::from_toml_str(&source).map_err(|e| e.with_file_path(path))
    }

    /// Uses `beamview.toml` in `dir` if it exists, defaults otherwise.
    pub fn load_or_default(dir: &Path) -> Result<RenderConfig, RenderError> {
        let path = dir.join(CONFIG_FILE_NAME);

        if path.is_file() {
            RenderConfig::load(&path)
        } else {
            Ok(RenderConfig::default())
        }
    }

    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }

    /// Indents every non-empty line of `text` by one level.
    pub fn indent(&self, text: &str) -> String {
        let unit = self.indent_unit();

        text.lines()
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{unit}{line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
