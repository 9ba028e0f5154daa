//! # Configuration Tests
//!
//! JSON parsing, per-field defaults, and validation of the stack size.

use std::io::Write;

use mini86_core::common::ConfigError;
use mini86_core::config::{ByteOrder, Config, UnknownOpcodePolicy};
use rstest::rstest;
use tempfile::NamedTempFile;

#[test]
fn defaults() {
    let config = Config::default();
    assert!(!config.general.trace_instructions);
    assert_eq!(config.general.max_instructions, None);
    assert_eq!(config.general.unknown_opcode, UnknownOpcodePolicy::Strict);
    assert_eq!(config.memory.stack_size, 1024);
    assert_eq!(config.memory.byte_order, ByteOrder::Native);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_object_is_default() {
    assert_eq!(Config::from_json_str("{}").unwrap(), Config::default());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::from_json_str(r#"{ "general": { "max_instructions": 500 } }"#).unwrap();
    assert_eq!(config.general.max_instructions, Some(500));
    assert_eq!(config.general.unknown_opcode, UnknownOpcodePolicy::Strict);
    assert_eq!(config.memory.stack_size, 1024);
}

#[test]
fn full_config() {
    let json = r#"{
        "general": {
            "trace_instructions": true,
            "max_instructions": 10,
            "unknown_opcode": "Lenient"
        },
        "memory": { "stack_size": 65536, "byte_order": "Little" }
    }"#;
    let config = Config::from_json_str(json).unwrap();
    assert!(config.general.trace_instructions);
    assert_eq!(config.general.max_instructions, Some(10));
    assert_eq!(config.general.unknown_opcode, UnknownOpcodePolicy::Lenient);
    assert_eq!(config.memory.stack_size, 65536);
    assert_eq!(config.memory.byte_order, ByteOrder::Little);
}

#[rstest]
#[case(0)]
#[case(6)]
#[case(1023)]
fn bad_stack_size_is_invalid(#[case] size: usize) {
    let json = format!(r#"{{ "memory": {{ "stack_size": {size} }} }}"#);
    match Config::from_json_str(&json) {
        Err(ConfigError::Invalid(msg)) => assert!(msg.contains(&size.to_string()), "{msg}"),
        other => panic!("expected invalid config, got {other:?}"),
    }
}

#[test]
fn oversized_stack_is_invalid() {
    let mut config = Config::default();
    config.memory.stack_size = 1 << 32;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[rstest]
#[case("{")]
#[case(r#"{ "general": { "unknown_opcode": "Sloppy" } }"#)]
#[case(r#"{ "memory": { "stack_size": -4 } }"#)]
fn malformed_json_is_a_parse_error(#[case] json: &str) {
    assert!(matches!(
        Config::from_json_str(json),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn from_file_reads_json() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "memory": {{ "byte_order": "Big" }} }}"#).unwrap();
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.memory.byte_order, ByteOrder::Big);
}

#[test]
fn from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::from_file(dir.path().join("nope.json"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn byte_order_assembles_words() {
    let bytes = [0x01, 0x02, 0x03, 0x04];
    assert_eq!(ByteOrder::Little.word(bytes), 0x0403_0201);
    assert_eq!(ByteOrder::Big.word(bytes), 0x0102_0304);
    assert_eq!(ByteOrder::Native.word(bytes), u32::from_ne_bytes(bytes));
}
