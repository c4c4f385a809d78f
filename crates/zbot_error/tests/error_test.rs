use zbot_error::{ConfigError, DatabaseError, DatabaseErrorKind, ZbotError, ZbotErrorKind};

#[test]
fn config_error_records_caller_location() {
    let err = ConfigError::new("No MongoDB database name configured");
    assert_eq!(err.file, file!());
    assert!(err.line > 0);
    assert!(err.to_string().contains("No MongoDB database name configured"));
}

#[test]
fn database_error_kind_is_preserved() {
    let err = DatabaseError::new(DatabaseErrorKind::MissingField("message_id".to_string()));
    assert_eq!(
        err.kind(),
        &DatabaseErrorKind::MissingField("message_id".to_string())
    );
    assert!(err.to_string().contains("message_id"));
}

#[test]
fn wrapper_discriminates_kinds() {
    let err: ZbotError = DatabaseError::new(DatabaseErrorKind::NotConnected).into();
    assert!(matches!(err.kind(), ZbotErrorKind::Database(_)));

    let err: ZbotError = ConfigError::new("missing").into();
    assert!(matches!(err.kind(), ZbotErrorKind::Config(_)));
}
