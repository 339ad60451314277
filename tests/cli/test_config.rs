//! Tests for the show-config command and configuration loading
//!
//! Loading reads environment variables, so these tests run serially.

use super::test_helpers::create_cli_test_services;
use crate::common::TestRepo;
use serial_test::serial;
use std::env;
use stemdex::cli::commands::{config, ConfigArgs};
use stemdex::cli::OutputFormat;
use stemdex::core::config::Config;
use stemdex::core::xdg::XdgDirs;

/// Test show-config in both output formats
#[test]
fn test_show_config_formats() {
    let services = create_cli_test_services();

    assert!(config::execute(ConfigArgs {}, &services, OutputFormat::Human).is_ok());
    assert!(config::execute(ConfigArgs {}, &services, OutputFormat::Json).is_ok());
}

/// Test that the XDG config file is picked up and env vars override it
#[test]
#[serial]
fn test_xdg_file_then_env_override() {
    let dir = TestRepo::with_files(&[(
        "config.toml",
        "[threads]\nworkers = 3\n\n[crawl]\nlimit = 12\n\n[search]\npartial = false\n",
    )]);
    let xdg = XdgDirs {
        config_dir: dir.path().to_path_buf(),
    };
    env::remove_var("STEMDEX_CONFIG");
    env::set_var("STEMDEX_CRAWL_LIMIT", "20");

    let config = Config::load_with_xdg(&xdg).unwrap();
    env::remove_var("STEMDEX_CRAWL_LIMIT");

    assert_eq!(config.threads.workers, 3);
    assert_eq!(config.crawl.limit, 20);
    assert!(!config.search.partial);
    assert_eq!(config.text.language, "english");
}

/// Test that an explicit config file wins over the XDG file
#[test]
#[serial]
fn test_explicit_config_file() {
    let xdg_dir = TestRepo::with_files(&[("config.toml", "[threads]\nworkers = 3\n")]);
    let explicit = TestRepo::with_files(&[("custom.toml", "[threads]\nworkers = 9\n")]);
    let xdg = XdgDirs {
        config_dir: xdg_dir.path().to_path_buf(),
    };
    env::set_var("STEMDEX_CONFIG", explicit.path().join("custom.toml"));

    let config = Config::load_with_xdg(&xdg);
    env::remove_var("STEMDEX_CONFIG");

    assert_eq!(config.unwrap().threads.workers, 9);
}

/// Test that an invalid file is a configuration error
#[test]
#[serial]
fn test_invalid_config_rejected() {
    let dir = TestRepo::with_files(&[("config.toml", "[threads]\nworkers = 0\n")]);
    let xdg = XdgDirs {
        config_dir: dir.path().to_path_buf(),
    };
    env::remove_var("STEMDEX_CONFIG");

    let err = Config::load_with_xdg(&xdg).unwrap_err();

    assert!(err.is_config_error());
}
