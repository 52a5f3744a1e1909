use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_defaults_to_the_local_service_url() {
    assert_eq!(
        Config::default(ConfigKey::CaddieURL),
        "http://localhost:7860"
    );
}

#[test]
fn it_defaults_the_username_to_something_printable() {
    assert!(!Config::default(ConfigKey::Username).is_empty());
}

#[test]
fn it_loads_overrides_from_cli_matches() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "caddie",
        "--caddie-url",
        "http://localhost:9999",
    ])?;
    Config::load(vec![&matches])?;

    assert_eq!(Config::get(ConfigKey::CaddieURL), "http://localhost:9999");
    assert_eq!(
        Config::get(ConfigKey::HealthCheckTimeout),
        Config::default(ConfigKey::HealthCheckTimeout)
    );

    return Ok(());
}
