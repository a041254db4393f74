use assert_cmd::prelude::*;
use mockito::Matcher;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const DATASET_PATH: &str = "/resource/c2es-76ed.json";

const PERMITS: &str = r#"[
    {"permitnum": "BP2024-00001", "statuscurrent": "Issued Permit", "permittype": "Residential Improvement Project",
     "workclass": "New", "contractorname": "ACME BUILDERS", "communityname": "BELTLINE",
     "estprojectcost": "250000", "applieddate": "2024-05-01T00:00:00.000",
     "latitude": "51.04", "longitude": "-114.07"},
    {"permitnum": "BP2024-00002", "statuscurrent": "Completed", "permittype": "Commercial / Multi Family Project",
     "workclass": "Alteration", "contractorname": "ZENITH LTD", "communityname": "HILLHURST",
     "estprojectcost": "1200000", "applieddate": "2024-04-12T00:00:00.000",
     "latitude": "51.06", "longitude": "-114.09"},
    {"permitnum": "BP2024-00003", "statuscurrent": "Issued Permit", "permittype": "Demolition",
     "workclass": "Demolition", "estprojectcost": "not available",
     "latitude": "51.02", "longitude": "-114.01"},
    {"permitnum": "BP2024-00004", "statuscurrent": "Issued Permit", "permittype": "Residential Improvement Project"}
]"#;

/// Path to a config file that does not exist, so every setting is a default
fn empty_config(dir: &Path) -> PathBuf {
    dir.join("config.yaml")
}

fn permitleads(server: &mockito::ServerGuard, config: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("permitleads"));
    cmd.arg("--config")
        .arg(config)
        .arg("--api-url")
        .arg(format!("{}{}", server.url(), DATASET_PATH))
        .env_remove("PERMITLEADS_FORMAT")
        .env_remove("PERMITLEADS_CONFIG")
        .env_remove("PERMITLEADS_API_URL")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn serve_permits(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("GET", DATASET_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PERMITS)
        .create()
}

#[test]
fn help_lists_commands() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("permitleads"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("permits"))
        .stdout(predicate::str::contains("analytics"))
        .stdout(predicate::str::contains("health"));
    Ok(())
}

#[test]
fn version_prints_package_version() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("permitleads"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn list_filters_by_status_as_json() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let mock = serve_permits(&mut server);
    let temp = tempdir()?;

    let assert = permitleads(&server, &empty_config(temp.path()))
        .args(["permits", "list", "--status", "Issued Permit", "--format", "json"])
        .assert()
        .success();

    mock.assert();
    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    let data = &out["data"];

    // The row without coordinates is never cached.
    assert_eq!(data["total_count"], 3);
    assert_eq!(data["filtered_count"], 2);
    assert_eq!(data["limit"], 1000);
    let nums: Vec<&str> = data["permits"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["permit_num"].as_str().unwrap())
        .collect();
    assert_eq!(nums, vec!["BP2024-00001", "BP2024-00003"]);
    assert!(out["meta"]["cache_updated"].is_string());
    Ok(())
}

#[test]
fn list_table_shows_footer() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    serve_permits(&mut server);
    let temp = tempdir()?;

    permitleads(&server, &empty_config(temp.path()))
        .args(["permits", "list", "--min-cost", "100000", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PERMIT"))
        .stdout(predicate::str::contains("Showing 1 of 2 matching permits"));
    Ok(())
}

#[test]
fn invalid_cost_range_fails_without_fetching() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", DATASET_PATH)
        .match_query(Matcher::Any)
        .expect(0)
        .create();
    let temp = tempdir()?;

    permitleads(&server, &empty_config(temp.path()))
        .args(["permits", "list", "--min-cost", "500", "--max-cost", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid query"));

    mock.assert();
    Ok(())
}

#[test]
fn oversized_date_range_is_invalid_query() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", DATASET_PATH)
        .match_query(Matcher::Any)
        .expect(0)
        .create();
    let temp = tempdir()?;

    for command in ["list", "summary"] {
        permitleads(&server, &empty_config(temp.path()))
            .args(["permits", command, "--date-range", "1000000000days"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("exceeds the maximum"));
    }

    mock.assert();
    Ok(())
}

#[test]
fn negative_limit_is_invalid_query() -> Result<(), Box<dyn std::error::Error>> {
    let server = mockito::Server::new();
    let temp = tempdir()?;

    permitleads(&server, &empty_config(temp.path()))
        .args(["permits", "list", "--limit", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit must not be negative"));
    Ok(())
}

#[test]
fn get_missing_permit_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    serve_permits(&mut server);
    let temp = tempdir()?;

    permitleads(&server, &empty_config(temp.path()))
        .args(["permits", "get", "BP-NOPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Permit not found: BP-NOPE"));
    Ok(())
}

#[test]
fn get_existing_permit_pretty() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    serve_permits(&mut server);
    let temp = tempdir()?;

    permitleads(&server, &empty_config(temp.path()))
        .args(["permits", "get", "BP2024-00002", "--format", "pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ZENITH LTD"))
        .stdout(predicate::str::contains("$1,200,000"));
    Ok(())
}

#[test]
fn cold_start_failure_reports_no_data() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    server
        .mock("GET", DATASET_PATH)
        .match_query(Matcher::Any)
        .with_status(503)
        .create();
    let temp = tempdir()?;

    permitleads(&server, &empty_config(temp.path()))
        .args(["permits", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No permit data loaded yet"));
    Ok(())
}

#[test]
fn cache_refresh_failure_is_unavailable() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    server
        .mock("GET", DATASET_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .create();
    let temp = tempdir()?;

    permitleads(&server, &empty_config(temp.path()))
        .args(["cache", "refresh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Permit data source unavailable"));
    Ok(())
}

#[test]
fn community_analytics_json() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    serve_permits(&mut server);
    let temp = tempdir()?;

    let assert = permitleads(&server, &empty_config(temp.path()))
        .args(["analytics", "communities", "--format", "json"])
        .assert()
        .success();

    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    let communities = out["data"]["communities"].as_array().unwrap();
    assert_eq!(communities.len(), 3);
    assert_eq!(communities[0]["name"], "HILLHURST");
    assert_eq!(communities[2]["name"], "Unknown");
    Ok(())
}

#[test]
fn health_probes_without_loading_cache() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let probe = server
        .mock("GET", DATASET_PATH)
        .match_query(Matcher::UrlEncoded("$limit".into(), "1".into()))
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create();
    let temp = tempdir()?;

    let assert = permitleads(&server, &empty_config(temp.path()))
        .args(["health", "--format", "json"])
        .assert()
        .success();

    probe.assert();
    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(out["data"]["status"], "healthy");
    assert_eq!(out["data"]["upstream"], "up");
    assert_eq!(out["data"]["cache_status"], "empty");
    assert_eq!(out["data"]["permits_cached"], 0);
    Ok(())
}

#[test]
fn config_file_supplies_api_url() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    serve_permits(&mut server);
    let temp = tempdir()?;
    let config = temp.path().join("config.yaml");
    std::fs::write(
        &config,
        format!("api_url: {}{}\ndefault_page_limit: 1\n", server.url(), DATASET_PATH),
    )?;

    let assert = Command::new(assert_cmd::cargo::cargo_bin!("permitleads"))
        .args(["permits", "list", "--format", "json", "--config"])
        .arg(&config)
        .env_remove("PERMITLEADS_API_URL")
        .env_remove("PERMITLEADS_FORMAT")
        .assert()
        .success();

    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(out["data"]["permits"].as_array().unwrap().len(), 1);
    assert_eq!(out["data"]["filtered_count"], 3);
    Ok(())
}

#[test]
fn malformed_config_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let server = mockito::Server::new();
    let temp = tempdir()?;
    let config = temp.path().join("config.yaml");
    std::fs::write(&config, "fetch_limit: [oops")?;

    permitleads(&server, &config)
        .args(["health"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration"));
    Ok(())
}
