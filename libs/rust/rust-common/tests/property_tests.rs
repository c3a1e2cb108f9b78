//! Property-based tests for rust-common crate.
//!
//! These tests verify universal properties across all inputs using proptest.

use proptest::prelude::*;
use rust_common::{HttpConfig, PlatformError, TlsVerification, TracingConfig, build_http_client};
use std::time::Duration;

// Connectivity classification must not depend on the message text.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_connectivity_classification_is_message_independent(
        msg in "[a-zA-Z0-9 .:/]{1,50}"
    ) {
        let connectivity = vec![
            PlatformError::unavailable(msg.clone()),
            PlatformError::timeout(msg.clone()),
        ];
        for err in connectivity {
            prop_assert!(err.is_connectivity(), "{} should be a connectivity error", err);
        }

        let harness_side = vec![
            PlatformError::invalid_input(msg.clone()),
            PlatformError::internal(msg.clone()),
        ];
        for err in harness_side {
            prop_assert!(!err.is_connectivity(), "{} should not be a connectivity error", err);
        }
    }

    #[test]
    fn prop_error_display_keeps_message(msg in "[a-zA-Z0-9 ]{1,50}") {
        prop_assert!(PlatformError::unavailable(msg.clone()).to_string().ends_with(&msg));
        prop_assert!(PlatformError::invalid_input(msg.clone()).to_string().ends_with(&msg));
    }
}

// Any timeout combination and either TLS policy yields a buildable client.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_http_client_builds_for_any_policy(
        timeout_secs in 1u64..300,
        connect_secs in 1u64..60,
        accept_invalid in any::<bool>(),
        agent in "[a-z][a-z0-9-]{2,20}",
    ) {
        let config = HttpConfig::default()
            .with_timeout(Duration::from_secs(timeout_secs))
            .with_connect_timeout(Duration::from_secs(connect_secs))
            .with_user_agent(agent.clone())
            .with_tls(TlsVerification::from_accept_invalid(accept_invalid));

        prop_assert_eq!(config.tls.accepts_invalid_certs(), accept_invalid);
        prop_assert_eq!(&config.user_agent, &agent);
        prop_assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn prop_tracing_config_builder_preserves_values(
        service in "[a-z][a-z0-9-]{2,20}",
        level in prop_oneof![Just("trace"), Just("debug"), Just("info"), Just("warn"), Just("error")],
        json in any::<bool>(),
    ) {
        let mut config = TracingConfig::default()
            .with_service_name(service.clone())
            .with_log_level(level);
        if json {
            config = config.with_json_output();
        }

        prop_assert_eq!(config.service_name, service);
        prop_assert_eq!(config.log_level, level);
        prop_assert_eq!(config.json_output, json);
    }
}
