use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use serial_test::serial;

#[test]
#[serial]
fn non_http_url_fails_validation() {
    let _temp = setup_config_dir();
    let _url = EnvGuard::set("BH_ENGINE_URL", "ftp://engine.internal");

    let config = Config::load().unwrap();

    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn https_url_passes_validation() {
    let _temp = setup_config_dir();
    let _url = EnvGuard::set("BH_ENGINE_URL", "https://engine.internal");

    let config = Config::load().unwrap();

    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn zero_timeout_fails_validation() {
    let _temp = setup_config_dir();
    let _secs = EnvGuard::set("BH_ENGINE_TIMEOUT_SECS", "0");

    let config = Config::load().unwrap();

    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn oversized_timeout_fails_validation() {
    let _temp = setup_config_dir();
    let _secs = EnvGuard::set("BH_ENGINE_TIMEOUT_SECS", "600");

    let config = Config::load().unwrap();

    assert!(config.validate().is_err());
}
