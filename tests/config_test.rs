use cpr_tracker::config::ServerConfig;
use cpr_tracker::error::AppError;

#[test]
fn test_server_config_parses_bind_addr() {
    let config = ServerConfig::parse("0.0.0.0:8080").expect("Failed to parse");
    assert_eq!(config.bind_addr.port(), 8080);
    assert!(config.bind_addr.ip().is_unspecified());
}

#[test]
fn test_server_config_rejects_garbage() {
    let err = ServerConfig::parse("localhost").expect_err("should not parse");
    assert!(matches!(err, AppError::Config(_)));
}
