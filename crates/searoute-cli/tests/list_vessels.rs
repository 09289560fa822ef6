use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn fixture_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/vessels.csv")
        .canonicalize()
        .expect("vessel fixture present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("searoute-cli");
    cmd.env("RUST_LOG", "error");
    cmd
}

#[test]
fn lists_vessels_with_attributes() {
    let mut cmd = cli();
    cmd.arg("vessels").arg("--vessel-catalog").arg(fixture_catalog());

    cmd.assert()
        .success()
        .stdout(contains("Available vessels (4):"))
        .stdout(contains("Speed kn"))
        .stdout(contains("Aframax"))
        .stdout(contains("105000"))
        .stdout(contains("Panamax"));
}

#[test]
fn catalog_path_falls_back_to_environment() {
    let mut cmd = cli();
    cmd.env("SEAROUTE_VESSEL_CATALOG", fixture_catalog()).arg("vessels");
    cmd.assert().success().stdout(contains("Handysize"));
}

#[test]
fn duplicate_presets_fail() {
    let temp = tempdir().expect("create temp dir");
    let path = temp.path().join("dupes.csv");
    fs::write(
        &path,
        "name,speed,draft,beam,shipLength,hpReq,fuelRate,baseWeight,load\n\
         Tug,10,4,10,30,2000,0.25,300,0\n\
         TUG,10,4,10,30,2000,0.25,300,0\n",
    )
    .expect("write catalog");

    let mut cmd = cli();
    cmd.env_remove("SEAROUTE_VESSEL_CATALOG")
        .arg("vessels")
        .arg("--vessel-catalog")
        .arg(&path);
    cmd.assert()
        .failure()
        .stderr(contains("failed to load vessel presets"))
        .stderr(contains("duplicate vessel preset"));
}
