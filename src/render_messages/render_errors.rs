use crate::render_messages::render_warnings::RenderWarning;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// The final set of errors and warnings emitted while rendering
#[derive(Debug, Default)]
pub struct RenderMessages {
    pub errors: Vec<RenderError>,
    pub warnings: Vec<RenderWarning>,
}

impl RenderMessages {
    pub fn from_error(error: RenderError) -> Self {
        RenderMessages {
            errors: vec![error],
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug, Eq, Hash, PartialEq)]
pub enum ErrorMetaDataKey {
    // Where in the input the problem was found
    TermPath,
    FoundShape,
    ExpectedShape,

    // Optional suggestions
    PrimarySuggestion,
}

/// Errors at the edges of the renderer (files, decoding, config, payload shape).
/// Converters themselves never fail; they fall back to sentinel text instead.
#[derive(Debug)]
pub struct RenderError {
    pub msg: String,
    pub file_path: Option<PathBuf>,
    pub error_type: ErrorType,

    // For structured and detailed error messages
    pub metadata: HashMap<ErrorMetaDataKey, String>,
}

impl RenderError {
    pub fn new(msg: impl Into<String>, error_type: ErrorType) -> RenderError {
        RenderError {
            msg: msg.into(),
            file_path: None,
            error_type,
            metadata: HashMap::new(),
        }
    }

    pub fn with_file_path(mut self, file_path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn new_metadata_entry(&mut self, key: ErrorMetaDataKey, value: impl Into<String>) {
        self.metadata.insert(key, value.into());
    }

    /// Create a file system error for the given path
    pub fn file_error(path: &Path, msg: impl Into<String>) -> Self {
        RenderError::new(msg, ErrorType::File).with_file_path(path)
    }

    /// The input could not be decoded into terms at all
    pub fn decode_error(msg: impl Into<String>) -> Self {
        RenderError::new(msg, ErrorType::Decode)
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        RenderError::new(msg, ErrorType::Config)
    }

    /// The top-level payload is not any known debug info layout
    pub fn shape_error(msg: impl Into<String>, found: impl Into<String>) -> Self {
        let mut error = RenderError::new(msg, ErrorType::Shape);
        error.new_metadata_entry(ErrorMetaDataKey::FoundShape, found);
        error
    }
}

// The type of error, used to pick how it is displayed
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum ErrorType {
    File,
    Decode,
    Config,
    Shape,
}

pub fn error_type_to_str(e_type: &ErrorType) -> &'static str {
    match e_type {
        ErrorType::File => "File Error",
        ErrorType::Decode => "Term Decoding Error",
        ErrorType::Config => "Malformed Config",
        ErrorType::Shape => "Unrecognised Debug Info",
    }
}
