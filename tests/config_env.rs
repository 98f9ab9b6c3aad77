use build_cleanup::{default_config_path, load_config, CleanupPolicy, LogLevel};
use serial_test::serial;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
#[serial]
fn env_override_selects_and_loads_config() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cleanup.xml");
    let log_file = td.path().join("cleanup.log");
    fs::write(
        &cfg_path,
        format!(
            r#"<config>
  <retries>3</retries>
  <retry_delay_ms>50</retry_delay_ms>
  <shell_fallback>false</shell_fallback>
  <fail_fast>true</fail_fast>
  <log_level>info</log_level>
  <log_file>{}</log_file>
</config>"#,
            log_file.display()
        ),
    )
    .unwrap();

    unsafe {
        std::env::set_var("BUILD_CLEANUP_CONFIG", &cfg_path);
    }
    let resolved = default_config_path();
    let loaded = load_config();
    unsafe {
        std::env::remove_var("BUILD_CLEANUP_CONFIG");
    }

    assert_eq!(resolved.as_deref(), Some(cfg_path.as_path()));
    let cfg = loaded.unwrap();
    assert_eq!(cfg.remove.retries, 3);
    assert_eq!(cfg.remove.delay, Duration::from_millis(50));
    assert!(!cfg.remove.shell_fallback);
    assert!(cfg.remove.ignore_errors);
    assert_eq!(cfg.policy, CleanupPolicy::FailFast);
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert_eq!(cfg.log_file.as_deref(), Some(log_file.as_path()));
}

#[test]
#[serial]
fn missing_config_file_yields_defaults() {
    let td = tempdir().unwrap();
    unsafe {
        std::env::set_var("BUILD_CLEANUP_CONFIG", td.path().join("absent.xml"));
    }
    let loaded = load_config();
    unsafe {
        std::env::remove_var("BUILD_CLEANUP_CONFIG");
    }
    let cfg = loaded.unwrap();
    assert_eq!(cfg.remove.retries, 5);
    assert_eq!(cfg.remove.delay, Duration::from_millis(500));
    assert_eq!(cfg.policy, CleanupPolicy::ContinueOnError);
}
