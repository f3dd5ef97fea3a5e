#[cfg(test)]
mod tests {
    use crate::config::{self, AppConfig};
    use std::env;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::NamedTempFile;

    // Tests below mutate process-wide env vars; run them one at a time.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_temp_config(content: &str) -> NamedTempFile {
        let mut temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_valid_config_does_not_error() {
        let _guard = env_lock();
        assert!(config::load().is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite://data/bookshelf.db");
        assert_eq!(config.database.max_connections, 8);
        assert_eq!(config.http.max_body_bytes, 1024 * 1024);
        assert!(config.security.is_none());
    }

    #[test]
    fn test_invalid_server_port() {
        let _guard = env_lock();
        env::set_var("BOOKSHELF__SERVER__PORT", "0");
        let result = config::load();
        env::remove_var("BOOKSHELF__SERVER__PORT");

        assert!(result.unwrap_err().to_string().contains("invalid server.port"));
    }

    #[test]
    fn test_invalid_max_connections() {
        let _guard = env_lock();
        env::set_var("BOOKSHELF__DATABASE__MAX_CONNECTIONS", "0");
        let result = config::load();
        env::remove_var("BOOKSHELF__DATABASE__MAX_CONNECTIONS");

        assert!(result.unwrap_err().to_string().contains("database.max_connections must be in 1..=256"));
    }

    #[test]
    fn test_invalid_max_body_bytes() {
        let _guard = env_lock();
        env::set_var("BOOKSHELF__HTTP__MAX_BODY_BYTES", "0");
        let result = config::load();
        env::remove_var("BOOKSHELF__HTTP__MAX_BODY_BYTES");

        assert!(result.unwrap_err().to_string().contains("http.max_body_bytes must be > 0"));
    }

    #[test]
    fn test_config_from_env() {
        let _guard = env_lock();
        env::set_var("BOOKSHELF__SERVER__HOST", "0.0.0.0");
        env::set_var("BOOKSHELF__SERVER__PORT", "8081");
        env::set_var("BOOKSHELF__DATABASE__URL", "sqlite://test.db");

        let result = config::load();

        env::remove_var("BOOKSHELF__SERVER__HOST");
        env::remove_var("BOOKSHELF__SERVER__PORT");
        env::remove_var("BOOKSHELF__DATABASE__URL");

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.database.url, "sqlite://test.db");
    }

    #[test]
    fn test_config_from_file() {
        let _guard = env_lock();
        let temp_file = write_temp_config(
            r#"
[server]
host = "192.168.1.1"
port = 9000

[database]
url = "sqlite://custom.db"
max_connections = 4

[security]
enable_hsts = true
"#,
        );
        env::set_var("BOOKSHELF_CONFIG", temp_file.path());

        let result = config::load();
        env::remove_var("BOOKSHELF_CONFIG");

        let config = result.unwrap();
        assert_eq!(config.server.host, "192.168.1.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.url, "sqlite://custom.db");
        assert_eq!(config.database.max_connections, 4);
        // untouched sections keep their defaults
        assert_eq!(config.http.max_body_bytes, 1024 * 1024);
        assert_eq!(config.security.unwrap().enable_hsts, Some(true));
    }

    #[test]
    fn test_config_priority() {
        let _guard = env_lock();
        let temp_file = write_temp_config("[server]\nport = 7000\n");
        env::set_var("BOOKSHELF_CONFIG", temp_file.path());
        env::set_var("BOOKSHELF__SERVER__PORT", "8888");

        let result = config::load();

        env::remove_var("BOOKSHELF_CONFIG");
        env::remove_var("BOOKSHELF__SERVER__PORT");

        // Environment variable should override file config
        assert_eq!(result.unwrap().server.port, 8888);
    }

    #[test]
    fn test_ensure_sqlite_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("subdir/test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        assert!(!db_path.parent().unwrap().exists());

        config::ensure_sqlite_parent_dir(&db_url).unwrap();

        assert!(db_path.parent().unwrap().exists());
    }

    #[test]
    fn test_ensure_sqlite_parent_dir_non_sqlite() {
        assert!(config::ensure_sqlite_parent_dir("postgres://localhost/db").is_ok());
        assert!(config::ensure_sqlite_parent_dir("sqlite::memory:").is_ok());
    }
}
