use dfe_core::errors::{DfeError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("set", "gc")
        .with_context("reason", "example")
}

#[test]
fn config_error_surface() {
    let err = DfeError::Config(sample_info("C001", "non-positive box side"));
    assert_eq!(err.info().code, "C001");
    assert!(err.info().context.contains_key("set"));
}

#[test]
fn io_error_surface() {
    let err = DfeError::io("dfe.root_read", "permission denied");
    assert_eq!(err.info().code, "dfe.root_read");
    assert_eq!(err.info().message, "permission denied");
}

#[test]
fn display_includes_context_and_hint() {
    let err = DfeError::Config(
        sample_info("C002", "duplicate set").with_hint("rename one of the sets"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("config error: duplicate set (code: C002)"));
    assert!(rendered.contains("reason=example, set=gc"));
    assert!(rendered.ends_with("| hint: rename one of the sets"));
}

#[test]
fn serde_tagging_is_stable() {
    let err = DfeError::serde("S001", "schema mismatch");
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "Serde");
    assert_eq!(json["detail"]["code"], "S001");
    let back: DfeError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, err);
}
