pub mod display_messages;
pub mod render_dev_logging;
pub mod render_errors;
pub mod render_warnings;
