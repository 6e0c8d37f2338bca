use std::env;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use cirrus::config;

// Env-var tests share process state; serialize them.
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[test]
fn sanitize_base_url_removes_trailing_slashes() {
    assert_eq!(
        config::sanitize_base_url("https://cloud.example.org/api/"),
        "https://cloud.example.org/api"
    );
    assert_eq!(
        config::sanitize_base_url("https://cloud.example.org/api///"),
        "https://cloud.example.org/api"
    );
}

#[test]
fn sanitize_base_url_trims_whitespace() {
    assert_eq!(
        config::sanitize_base_url("  https://cloud.example.org/api/  "),
        "https://cloud.example.org/api"
    );
}

#[test]
fn sanitize_base_url_falls_back_on_empty_input() {
    assert_eq!(config::sanitize_base_url(""), "http://localhost:8000");
    assert_eq!(config::sanitize_base_url("   "), "http://localhost:8000");
}

#[test]
fn get_api_base_url_sanitizes_the_env_value() {
    let _guard = ENV_LOCK.lock().unwrap();
    env::set_var("API_BASE_URL", "https://cloud.example.org/api/");
    assert_eq!(config::get_api_base_url(), "https://cloud.example.org/api");
    env::remove_var("API_BASE_URL");
}

#[test]
fn get_api_base_url_uses_the_default_when_unset() {
    let _guard = ENV_LOCK.lock().unwrap();
    env::remove_var("API_BASE_URL");
    assert_eq!(config::get_api_base_url(), "http://localhost:8000");
}

#[test]
fn parse_services_reads_id_name_pairs() {
    let services = config::parse_services("1=East Cloud, 2=West Cloud");
    assert_eq!(services.len(), 2);
    assert_eq!(services[0].id, 1);
    assert_eq!(services[0].name, "East Cloud");
    assert_eq!(services[1].id, 2);
    assert_eq!(services[1].name, "West Cloud");
}

#[test]
fn parse_services_names_bare_ids() {
    let services = config::parse_services("7");
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].id, 7);
    assert_eq!(services[0].name, "service 7");
}

#[test]
fn parse_services_skips_invalid_entries() {
    let services = config::parse_services("0=zero, x=bad, , 3=ok, -2=neg");
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].id, 3);
}

#[test]
fn parse_services_of_empty_input_is_empty() {
    assert!(config::parse_services("").is_empty());
}
