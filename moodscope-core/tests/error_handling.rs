use moodscope_core::{ConfigError, CoreError, ErrorExt, ErrorReporter};

#[test]
fn test_error_codes() {
    let request_error = CoreError::RequestFailed {
        message: "Network response was not ok".to_string(),
        status_code: Some(500),
    };
    assert_eq!(request_error.error_code(), "REQUEST_FAILED");

    let input_error = CoreError::InvalidInput {
        message: "missing".to_string(),
    };
    assert_eq!(input_error.error_code(), "INVALID_INPUT");

    let config_error = CoreError::Config(ConfigError::InvalidValue {
        field: "backend_url".to_string(),
        value: "nope".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG");

    let closed = CoreError::ChannelClosed {
        channel: "dashboard events".to_string(),
    };
    assert_eq!(closed.error_code(), "CHANNEL_CLOSED");
}

#[test]
fn test_request_failure_displays_verbatim() {
    let error = CoreError::RequestFailed {
        message: "Network response was not ok".to_string(),
        status_code: Some(503),
    };
    assert_eq!(error.to_string(), "Network response was not ok");
    assert!(error.user_friendly_message().contains("503"));
}

#[test]
fn test_user_friendly_messages() {
    let input_error = CoreError::InvalidInput {
        message: "Please fill in both subreddits and number of posts.".to_string(),
    };
    assert_eq!(
        input_error.user_friendly_message(),
        "Please fill in both subreddits and number of posts."
    );

    let config_error = CoreError::Config(ConfigError::InvalidValue {
        field: "connect_timeout_secs".to_string(),
        value: "0".to_string(),
    });
    let message = config_error.user_friendly_message();
    assert!(!message.is_empty());
    assert!(message.contains("connect_timeout_secs"));
}

#[test]
fn test_error_reporter() {
    let reporter = ErrorReporter::new()
        .with_error_reporting(true)
        .with_warning_reporting(true);
    let error = CoreError::Timeout { seconds: 30 };

    // This test just ensures the methods don't panic
    reporter.report_error(&error);
    reporter.report_warning(&error);
}
