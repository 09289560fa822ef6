use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn prints_padded_weekly_request() {
    let output = cargo_bin_cmd!("searoute-cli")
        .env("RUST_LOG", "error")
        .args([
            "env-request",
            "--from-lat",
            "1.3",
            "--from-lng",
            "103.8",
            "--to-lat",
            "22.3",
            "--to-lng",
            "114.2",
            "--date",
            "2024-03-14",
            "--padding",
            "2",
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["date"], "2024-03-10");
    assert!((body["min_lat"].as_f64().expect("min_lat") + 0.7).abs() < 1e-9);
    assert!((body["max_lon"].as_f64().expect("max_lon") - 116.2).abs() < 1e-9);
}

#[test]
fn negative_coordinates_are_accepted_and_clamped() {
    cargo_bin_cmd!("searoute-cli")
        .env("RUST_LOG", "error")
        .args([
            "env-request",
            "--from-lat",
            "-88",
            "--from-lng",
            "-179",
            "--to-lat",
            "-80",
            "--to-lng",
            "-170",
            "--date",
            "2024-01-07",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"min_lat\": -90.0"))
        .stdout(predicate::str::contains("\"date\": \"2024-01-07\""));
}

#[test]
fn invalid_date_is_rejected() {
    cargo_bin_cmd!("searoute-cli")
        .args([
            "env-request", "--from-lat", "0", "--from-lng", "0", "--to-lat", "1", "--to-lng", "1",
            "--date", "2024-13-40",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--date"));
}
