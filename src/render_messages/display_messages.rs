use crate::render_messages::render_errors::{
    ErrorMetaDataKey, ErrorType, RenderError, RenderMessages, error_type_to_str,
};
use crate::render_messages::render_warnings::{RenderWarning, warning_kind_to_str};
use saying::say;
use std::env;
use std::path::Path;

fn relative_display_path(path: &Path) -> String {
    match env::current_dir() {
        Ok(dir) => path
            .strip_prefix(&dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string(),
        Err(_) => path.to_string_lossy().to_string(),
    }
}

pub fn print_render_messages(messages: RenderMessages, show_warnings: bool) {
    for err in messages.errors {
        print_formatted_error(err);
    }

    if show_warnings {
        for warning in messages.warnings {
            print_formatted_warning(warning);
        }
    }
}

pub fn print_formatted_error(e: RenderError) {
    let relative_dir = match &e.file_path {
        Some(path) => relative_display_path(path),
        None => String::from("<input>"),
    };

    match e.error_type {
        ErrorType::File => {
            say!(Yellow "Can't find/read file: ", relative_dir);
            say!(e.msg);
        }
        ErrorType::Config => {
            say!(Yellow "CONFIG FILE ISSUE - ", Dark Magenta relative_dir);
            say!(e.msg);
        }
        ErrorType::Decode | ErrorType::Shape => {
            say!(Red error_type_to_str(&e.error_type), " in ", Dark Magenta relative_dir);
            say!(e.msg);
        }
    }

    if let Some(found) = e.metadata.get(&ErrorMetaDataKey::FoundShape) {
        say!(Bright Black "  found: ", found);
    }
    if let Some(expected) = e.metadata.get(&ErrorMetaDataKey::ExpectedShape) {
        say!(Bright Black "  expected: ", expected);
    }
    if let Some(path) = e.metadata.get(&ErrorMetaDataKey::TermPath) {
        say!(Bright Black "  at: ", path);
    }
    if let Some(suggestion) = e.metadata.get(&ErrorMetaDataKey::PrimarySuggestion) {
        say!(Green "  help: ", suggestion);
    }
}

pub fn print_formatted_warning(w: RenderWarning) {
    let line = match w.line {
        Some(line) => line.to_string(),
        None => String::from("?"),
    };

    say!(Yellow "WARNING: ", warning_kind_to_str(w.warning_kind));
    say!(Dark Magenta "Line ", Bright line, " ", w.msg);
}
