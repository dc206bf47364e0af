use std::io::Write;

use faultline_code::{BootstrapError, build_registry, codes};
use faultline_config::{Config, LogFormat};
use http::StatusCode;

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn overrides_from_file_reach_the_registry() {
    let file = config_file(
        r#"
[log]
format = "json"

[[codes]]
code = 100404
status = 410
message = "Resource is gone"

[[codes]]
code = 300001
status = 409
message = "Coupon already used"
"#,
    );

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.log.format, LogFormat::Json);

    let registry = build_registry(&config.codes).unwrap();
    assert_eq!(registry.http_status(codes::NOT_FOUND), StatusCode::GONE);
    assert_eq!(registry.lookup(codes::NOT_FOUND).unwrap().message(), "Resource is gone");
    assert_eq!(registry.http_status(300_001), StatusCode::CONFLICT);
    assert_eq!(registry.len(), codes::DEFAULT_CODES.len() + 1);
}

#[test]
fn invalid_overrides_never_reach_the_registry() {
    let file = config_file("[[codes]]\ncode = 0\nstatus = 400\nmessage = \"zero\"\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("reserved"));
}

#[test]
fn bootstrap_rejects_statuses_the_loader_never_saw() {
    let overrides = Config::default().codes;
    assert!(build_registry(&overrides).is_ok());

    let bad = [faultline_config::CodeOverride {
        code: 300_001,
        status: 1_000,
        message: "x".to_owned(),
    }];
    assert_eq!(
        build_registry(&bad).unwrap_err(),
        BootstrapError::InvalidStatus {
            code: 300_001,
            status: 1_000
        }
    );
}
