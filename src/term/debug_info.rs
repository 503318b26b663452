//! Locating the abstract-code forms inside a decoded debug info payload.
//!
//! The chunk reader hands over whatever term the compiler stored. Three layouts carry
//! Erlang abstract code:
//! - a bare list of forms
//! - `{raw_abstract_v1, Forms}` from the `Abst` chunk
//! - `{debug_info_v1, erl_abstract_code, {Forms, CompilerOptions}}` from the `Dbgi` chunk

use crate::render_messages::render_errors::{ErrorMetaDataKey, RenderError};
use crate::term::Term;
use crate::term::term_schema::describe;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const RAW_ABSTRACT_V1: &str = "raw_abstract_v1";
const DEBUG_INFO_V1: &str = "debug_info_v1";
const ERL_ABSTRACT_CODE: &str = "erl_abstract_code";

pub fn forms(payload: &Term) -> Result<&[Term], RenderError> {
    if let Some(forms) = payload.as_list() {
        return Ok(forms);
    }

    match (payload.tag(), payload.as_tuple()) {
        (Some(RAW_ABSTRACT_V1), Some([_, forms])) => forms
            .as_list()
            .ok_or_else(|| not_a_form_list(RAW_ABSTRACT_V1, forms)),

        (Some(DEBUG_INFO_V1), Some([_, backend, data])) => {
            if backend.as_atom() != Some(ERL_ABSTRACT_CODE) {
                let mut error = RenderError::shape_error(
                    "Debug info was written by a backend other than erl_abstract_code",
                    backend.to_string(),
                );
                error.new_metadata_entry(ErrorMetaDataKey::ExpectedShape, ERL_ABSTRACT_CODE);
                return Err(error);
            }

            // {Forms, CompilerOptions}, the options are not needed for rendering
            match data.as_tuple() {
                Some([forms, _compiler_options]) => forms
                    .as_list()
                    .ok_or_else(|| not_a_form_list(DEBUG_INFO_V1, forms)),
                _ => {
                    let mut error = RenderError::shape_error(
                        "Debug info carries no abstract code (compiled without debug_info?)",
                        data.to_string(),
                    );
                    error.new_metadata_entry(ErrorMetaDataKey::ExpectedShape, "{Forms, Options}");
                    Err(error)
                }
            }
        }

        _ => {
            let mut error = RenderError::shape_error(
                "Term is not a recognised debug info payload",
                describe(payload),
            );
            error.new_metadata_entry(
                ErrorMetaDataKey::ExpectedShape,
                "[Form] | {raw_abstract_v1, [Form]} | {debug_info_v1, erl_abstract_code, {[Form], Options}}",
            );
            Err(error)
        }
    }
}

fn not_a_form_list(layout: &str, found: &Term) -> RenderError {
    let mut error = RenderError::shape_error(
        format!("{layout} payload does not hold a list of forms"),
        describe(found),
    );
    error.new_metadata_entry(ErrorMetaDataKey::TermPath, layout);
    error
}

/// Reads a decoded payload that was serialized to JSON.
pub fn read_term_file(path: &Path) -> Result<Term, RenderError> {
    let source = fs::read_to_string(path)
        .map_err(|e| RenderError::file_error(path, format!("Could not read input: {e}")))?;

    parse_term_json(&source).map_err(|e| e.with_file_path(path))
}

/// Every `cons` cell nests two levels deep, so ordinary list literals go far past
/// serde_json's recursion limit. The limit is off and the stack grows on demand instead.
pub fn parse_term_json(source: &str) -> Result<Term, RenderError> {
    decode_json(source).map_err(|e| {
        let mut error = RenderError::decode_error(e.to_string());
        error.new_metadata_entry(
            ErrorMetaDataKey::PrimarySuggestion,
            r#"terms are externally tagged, e.g. {"tuple": [{"atom": "var"}, {"number": 1}, {"atom": "X"}]}"#,
        );
        error
    })
}

fn decode_json(source: &str) -> Result<Term, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(source);
    deserializer.disable_recursion_limit();

    let term = Term::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;

    Ok(term)
}
