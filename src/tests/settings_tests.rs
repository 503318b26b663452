use super::{CONFIG_FILE_NAME, RenderConfig};
use crate::render_messages::render_errors::ErrorType;
use std::fs;
use tempfile::TempDir;

#[test]
fn missing_keys_fall_back_to_defaults() {
    let config = RenderConfig::from_toml_str("indent_width = 4").expect("valid config");

    assert_eq!(config.indent_width, 4);
    assert!(!config.emit_line_comments);
    assert!(config.blank_line_between_forms);
}

#[test]
fn empty_config_is_the_default() {
    let config = RenderConfig::from_toml_str("").expect("empty config");
    assert_eq!(config, RenderConfig::default());
}

#[test]
fn unknown_keys_are_config_errors() {
    let error = RenderConfig::from_toml_str("indentation = 4").expect_err("unknown key");
    assert_eq!(error.error_type, ErrorType::Config);
}

#[test]
fn wrong_value_types_are_config_errors() {
    let error = RenderConfig::from_toml_str("emit_line_comments = \"yes\"").expect_err("bad type");
    assert_eq!(error.error_type, ErrorType::Config);
}

#[test]
fn load_or_default_reads_the_config_file_in_a_directory() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "emit_line_comments = true\nblank_line_between_forms = false\n",
    )
    .expect("write config");

    let config = RenderConfig::load_or_default(dir.path()).expect("config loads");
    assert!(config.emit_line_comments);
    assert!(!config.blank_line_between_forms);
}

#[test]
fn load_or_default_without_a_file_uses_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let config = RenderConfig::load_or_default(dir.path()).expect("defaults");
    assert_eq!(config, RenderConfig::default());
}

#[test]
fn load_errors_carry_the_config_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "indent_width = -1").expect("write config");

    let error = RenderConfig::load(&path).expect_err("negative width");
    assert_eq!(error.error_type, ErrorType::Config);
    assert_eq!(error.file_path.as_deref(), Some(path.as_path()));
}

#[test]
fn indent_skips_blank_lines() {
    let config = RenderConfig {
        indent_width: 4,
        ..RenderConfig::default()
    };

    assert_eq!(config.indent("a\n\nb"), "    a\n\n    b");
}
