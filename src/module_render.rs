//! # Module rendering
//!
//! Turns a whole debug info payload into one `defmodule` block.
//!
//! Forms are independent of each other once the module attributes are known, so they are
//! rendered in parallel. Each form gets its own warning buffer, and the results are put
//! back together in source order.

use crate::abstract_code::RenderContext;
use crate::abstract_code::calls::module_to_macro_string;
use crate::abstract_code::forms::{ModuleAttributes, convert_form};
use crate::render_messages::render_errors::RenderError;
use crate::render_messages::render_warnings::RenderWarning;
use crate::settings::{BYTES_PER_FORM, RenderConfig, UNKNOWN_MODULE};
use crate::term::Term;
use crate::term::debug_info;
use crate::{output_log, timer_log};
use rayon::prelude::*;
use std::cell::RefCell;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedModule {
    pub text: String,
    pub warnings: Vec<RenderWarning>,
}

/// One rendered form and whatever it warned about.
struct RenderedForm {
    text: Option<String>,
    warnings: Vec<RenderWarning>,
}

/// Reads a JSON term file and renders it.
pub fn render_file(path: &Path, config: &RenderConfig) -> Result<RenderedModule, RenderError> {
    let time = Instant::now();
    let payload = debug_info::read_term_file(path)?;
    timer_log!(time, "Decoded term file in: ");

    render_payload(&payload, config).map_err(|e| e.with_file_path(path))
}

/// Renders any of the debug info layouts that carry abstract code.
pub fn render_payload(payload: &Term, config: &RenderConfig) -> Result<RenderedModule, RenderError> {
    let forms = debug_info::forms(payload)?;
    Ok(render_forms(forms, config))
}

pub fn render_forms(forms: &[Term], config: &RenderConfig) -> RenderedModule {
    let time = Instant::now();
    let module = ModuleAttributes::collect(forms);

    let rendered: Vec<RenderedForm> = forms
        .par_iter()
        .map(|form| {
            let warnings = RefCell::new(Vec::new());
            let ctx = RenderContext::new(config, &warnings);
            let text = convert_form(form, &module, &ctx);

            RenderedForm {
                text,
                warnings: warnings.into_inner(),
            }
        })
        .collect();

    timer_log!(time, "Rendered forms in: ");

    let mut body = String::with_capacity(forms.len() * BYTES_PER_FORM);
    let mut warnings = Vec::new();
    let separator = if config.blank_line_between_forms { "\n\n" } else { "\n" };

    for form in rendered {
        warnings.extend(form.warnings);

        let Some(text) = form.text else {
            continue;
        };

        if !body.is_empty() {
            body.push_str(separator);
        }
        body.push_str(&text);
    }

    let name = match &module.name {
        Some(name) => module_to_macro_string(name),
        None => String::from(UNKNOWN_MODULE),
    };

    let text = if body.is_empty() {
        format!("defmodule {name} do\nend\n")
    } else {
        format!("defmodule {name} do\n{}\nend\n", config.indent(&body))
    };

    output_log!(Green "Rendered module:\n", text.clone());

    RenderedModule { text, warnings }
}
