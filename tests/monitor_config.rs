use std::sync::Mutex;
use std::time::Duration;

use tempfile::NamedTempFile;

use toy_monitor::config::MonitorConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "TOYMON_CONFIG",
        "TOYMON_HISTORY_PATH",
        "TOYMON_SOURCE_URL",
        "TOYMON_MIN_INTERVAL_SECS",
        "TOYMON_POLL_INTERVAL_MS",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_when_nothing_is_configured() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = MonitorConfig::load().expect("load config");

    assert_eq!(cfg.history_path, "toy_history.csv");
    assert_eq!(cfg.source.url, "stub://toy_camera");
    assert_eq!(cfg.source.width, 640);
    assert_eq!(cfg.source.height, 480);
    assert_eq!(cfg.min_interval, Duration::from_secs(3));
    assert_eq!(cfg.poll_interval, Duration::from_millis(10));

    clear_env();
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{
        "history_path": "den_history.csv",
        "source": {
            "url": "stub://den_camera",
            "width": 800,
            "height": 600
        },
        "throttle": {
            "min_interval_secs": 5.5
        },
        "poll": {
            "interval_ms": 25
        }
    }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");

    std::env::set_var("TOYMON_CONFIG", file.path());
    std::env::set_var("TOYMON_SOURCE_URL", "stub://garage_camera");
    std::env::set_var("TOYMON_MIN_INTERVAL_SECS", "2.5");

    let cfg = MonitorConfig::load().expect("load config");

    assert_eq!(cfg.history_path, "den_history.csv");
    assert_eq!(cfg.source.url, "stub://garage_camera");
    assert_eq!(cfg.source.width, 800);
    assert_eq!(cfg.source.height, 600);
    assert_eq!(cfg.min_interval, Duration::from_secs_f64(2.5));
    assert_eq!(cfg.poll_interval, Duration::from_millis(25));

    clear_env();
}

#[test]
fn rejects_invalid_env_values() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("TOYMON_MIN_INTERVAL_SECS", "soon");
    assert!(MonitorConfig::load().is_err());

    std::env::set_var("TOYMON_MIN_INTERVAL_SECS", "0");
    assert!(MonitorConfig::load().is_err());

    clear_env();
    std::env::set_var("TOYMON_POLL_INTERVAL_MS", "-5");
    assert!(MonitorConfig::load().is_err());

    clear_env();
}
