//! Renders Erlang abstract code from compiled debug info as readable Elixir source.

pub mod abstract_code;
pub mod cli;
pub mod module_render;
pub mod render_messages;
pub mod settings;
pub mod term;
