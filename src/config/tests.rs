use serial_test::serial;

use super::Settings;
use super::load_config;

#[test]
#[serial]
fn default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.server.max_connections, 1000);
    assert_eq!(settings.storage.data_dir, "parley_db");
}

#[test]
#[serial]
fn load_without_overrides_uses_defaults() {
    temp_env::with_vars_unset(["SERVER_HOST", "SERVER_PORT"], || {
        let settings = load_config().unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.storage.data_dir, "parley_db");
    });
}

#[test]
#[serial]
fn environment_overrides_the_host() {
    temp_env::with_var("SERVER_HOST", Some("0.0.0.0"), || {
        let settings = load_config().unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        // Everything else stays at its default.
        assert_eq!(settings.server.port, 8080);
    });
}
