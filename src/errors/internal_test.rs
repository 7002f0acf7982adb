#[cfg(test)]
mod tests {
    use crate::errors::internal::label::{
        INVALID_CUSTOM_LABEL_MSG, INVALID_KEY_VALUE_STR_MSG, MISSING_LABEL_KEY_MSG,
    };
    use crate::errors::internal::{AuthorizationError, InternalError, LabelError, ProvisionError};
    use sea_orm::DbErr;

    #[test]
    fn test_database_error_includes_operation() {
        let db_err = DbErr::RecordNotFound("test record".to_string());
        let error = InternalError::database("write_broker_template_instance", db_err);

        let error_string = error.to_string();
        assert!(error_string.contains("write_broker_template_instance"));
        assert!(error_string.contains("Database error"));
    }

    #[test]
    fn test_parse_error_includes_value_type() {
        let error = InternalError::parse("labels", "expected a JSON object");

        let error_string = error.to_string();
        assert!(error_string.contains("labels"));
        assert!(error_string.contains("expected a JSON object"));
        assert!(error_string.contains("Parse error"));
    }

    #[test]
    fn test_label_errors_display_fixed_messages() {
        assert_eq!(LabelError::InvalidCustomLabel.to_string(), INVALID_CUSTOM_LABEL_MSG);
        assert_eq!(LabelError::MissingLabelKey.to_string(), MISSING_LABEL_KEY_MSG);
        assert_eq!(LabelError::InvalidKeyValueStr.to_string(), INVALID_KEY_VALUE_STR_MSG);
    }

    #[test]
    fn test_label_error_is_transparent_in_internal_error() {
        let error = InternalError::from(LabelError::MissingLabelKey);
        assert_eq!(error.to_string(), MISSING_LABEL_KEY_MSG);
    }

    #[test]
    fn test_concurrency_exhausted_reports_attempts() {
        let error = ProvisionError::ConcurrencyExhausted {
            instance_id: "inst-1".to_string(),
            attempts: 5,
        };
        assert_eq!(
            error.to_string(),
            "Gave up provisioning inst-1 after 5 conflicting writes"
        );
    }

    #[test]
    fn test_review_failed_wraps_source() {
        let source = InternalError::database("review_access", DbErr::Custom("gone".to_string()));
        let error = AuthorizationError::ReviewFailed {
            namespace: "ns".to_string(),
            verb: "create".to_string(),
            source: Box::new(source),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("create"));
        assert!(error_string.contains("ns"));
        assert!(error_string.contains("review_access"));
    }
}
