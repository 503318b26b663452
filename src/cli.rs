//! Command-line entrypoint for the `beamview` binary.
//!
//! Parses the command, resolves the render config and prints the rendered module along
//! with any warnings.

use crate::module_render::{RenderedModule, render_file};
use crate::render_messages::display_messages::print_render_messages;
use crate::render_messages::render_errors::{RenderError, RenderMessages};
use crate::settings::{DEBUG_INFO_FILE_EXTENSION, RenderConfig};
use saying::say;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    // Renders a JSON encoded debug info term
    Render {
        path: PathBuf,
        config_path: Option<PathBuf>,
    },

    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    LineComments,
    DisableWarnings,
    DisableTimers,
}

pub fn start_cli() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help(false);
        return;
    }

    let command = match get_command(&args[1..]) {
        Ok(command) => command,
        Err(e) => {
            say!(Red e);
            print_help(true);
            return;
        }
    };

    let flags = get_flags(&args);

    match command {
        Command::Help => {
            print_help(false);
        }

        Command::Render { path, config_path } => {
            let time = Instant::now();
            let show_warnings = !flags.contains(&Flag::DisableWarnings);

            match render(&path, config_path.as_deref(), &flags) {
                Ok(rendered) => {
                    say!(rendered.text);

                    if !flags.contains(&Flag::DisableTimers) {
                        say!(Green "Rendered in: ", Green #time.elapsed());
                    }

                    let messages = RenderMessages {
                        errors: Vec::new(),
                        warnings: rendered.warnings,
                    };
                    print_render_messages(messages, show_warnings);
                }
                Err(e) => print_render_messages(RenderMessages::from_error(e), show_warnings),
            }
        }
    }
}

fn render(path: &Path, config_path: Option<&Path>, flags: &[Flag]) -> Result<RenderedModule, RenderError> {
    let mut config = match config_path {
        Some(config_path) => RenderConfig::load(config_path)?,

        // Look for a config file next to the input
        None => RenderConfig::load_or_default(path.parent().unwrap_or(Path::new(".")))?,
    };

    if flags.contains(&Flag::LineComments) {
        config.emit_line_comments = true;
    }

    render_file(path, &config)
}

fn get_command(args: &[String]) -> Result<Command, String> {
    let command = args.first().map(String::as_str);

    match command {
        Some("help") | Some("--help") => Ok(Command::Help),
        Some("render") => parse_render_command(args),
        Some(other) => Err(format!("Invalid command: '{other}'")),
        None => Err(String::from("No command given")),
    }
}

fn get_flags(args: &[String]) -> Vec<Flag> {
    let mut flags = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--lines" => flags.push(Flag::LineComments),
            "--hide-warnings" => flags.push(Flag::DisableWarnings),
            "--hide-timers" => flags.push(Flag::DisableTimers),
            _ => {}
        }
    }

    flags
}

fn parse_render_command(args: &[String]) -> Result<Command, String> {
    let mut path: Option<PathBuf> = None;
    let mut config_path = None;
    let mut index = 1usize;

    while let Some(arg) = args.get(index) {
        match arg.as_str() {
            "--config" => {
                let Some(value) = args.get(index + 1) else {
                    return Err(String::from("Missing value for --config"));
                };
                if value.starts_with("--") {
                    return Err(String::from("Missing value for --config"));
                }
                config_path = Some(PathBuf::from(value));
                index += 2;
            }
            "--lines" | "--hide-warnings" | "--hide-timers" => {
                index += 1;
            }
            _ if arg.starts_with("--") => {
                return Err(format!(
                    "Unknown render flag: '{arg}'. Supported flags are --config, --lines, --hide-warnings, --hide-timers."
                ));
            }
            _ => {
                if path.is_some() {
                    return Err(String::from("Render command accepts exactly one input file."));
                }
                path = Some(PathBuf::from(arg));
                index += 1;
            }
        }
    }

    let Some(path) = path else {
        return Err(String::from("Missing input file: beamview render <file.json>"));
    };

    if path.extension().and_then(|extension| extension.to_str()) != Some(DEBUG_INFO_FILE_EXTENSION) {
        return Err(format!(
            "Input must be a .{DEBUG_INFO_FILE_EXTENSION} term file, got '{}'",
            path.display()
        ));
    }

    Ok(Command::Render { path, config_path })
}

fn print_help(commands_only: bool) {
    if !commands_only {
        say!(Bright Black "------------------------------------");
        say!(Green Bold "beamview - Erlang abstract code as Elixir source");
        say!("Usage: ", Bold "<command>", Italic " <args>");
    }
    say!(Green Bold "\nCommands:");
    say!("  render <file.json>   - Renders a JSON encoded debug info term");
    say!("  help                 - Shows this message");

    say!(Green Bold "\nFlags:");
    say!("  --config <path>      (default: beamview.toml next to the input)");
    say!("  --lines              Emit # line N comments");
    say!("  --hide-warnings");
    say!("  --hide-timers");
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
