//! Tests for approval policy error types.

use super::*;
use std::error::Error as _;

#[test]
fn invalid_approval_mode_names_the_literal() {
    let error = ConfigurationError::InvalidApprovalMode {
        value: "require_most".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "\"require_most\" is not a valid approval mode"
    );
    assert!(error.source().is_none());
}

#[test]
fn read_error_keeps_io_cause() {
    let error = ConfigurationError::Read {
        source: io::Error::new(io::ErrorKind::UnexpectedEof, "stream closed"),
    };

    assert!(error.to_string().starts_with("error decoding configuration"));
    assert!(error.to_string().contains("stream closed"));

    let source = error.source().expect("Read error should expose a source");
    assert_eq!(source.to_string(), "stream closed");
}

#[test]
fn write_error_keeps_io_cause() {
    let error = ConfigurationError::Write {
        source: io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"),
    };

    assert!(error.to_string().starts_with("error encoding configuration"));
    assert!(error.source().is_some());
    assert!(error.location().is_none());
}

#[test]
fn decode_error_exposes_parser_location() {
    let source = serde_yaml::from_str::<Vec<String>>("- a\n- [b\n")
        .expect_err("unterminated flow sequence should not parse");
    let error = ConfigurationError::Decode { source };

    assert!(error.to_string().starts_with("error decoding configuration: "));
    let location = error.location().expect("parser should report a location");
    assert!(location.line() >= 2);
}

#[test]
fn empty_document_has_no_source() {
    let error = ConfigurationError::EmptyDocument;

    assert_eq!(
        error.to_string(),
        "error decoding configuration: document is empty"
    );
    assert!(error.source().is_none());
    assert!(error.location().is_none());
}
