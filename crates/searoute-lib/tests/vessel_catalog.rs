mod common;

use common::fixtures_dir;
use searoute_lib::{Error, VesselCatalog};

fn fixture_catalog() -> VesselCatalog {
    VesselCatalog::from_path(&fixtures_dir().join("vessels.csv")).expect("fixture should load")
}

#[test]
fn loads_fixture_catalog_and_lists_presets() {
    let catalog = fixture_catalog();
    assert_eq!(catalog.len(), 4);
    assert!(catalog
        .source_path()
        .is_some_and(|path| path.ends_with("vessels.csv")));
    let mut names = catalog.names();
    names.sort();
    assert_eq!(names, vec!["Aframax", "Feeder", "Handysize", "Panamax"]);

    let panamax = catalog.get("PANAMAX").expect("case-insensitive lookup");
    assert_eq!(panamax.speed, 14.0);
    assert_eq!(panamax.fouling_factor, 1.05);
    panamax.validate().expect("fixture vessel is valid");
}

#[test]
fn unknown_preset_suggests_close_names() {
    let err = fixture_catalog().lookup("Panamx").expect_err("unknown");
    match &err {
        Error::UnknownVessel { suggestions, .. } => {
            assert_eq!(suggestions.first().map(String::as_str), Some("Panamax"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("Did you mean 'Panamax'?"));
}

#[test]
fn rejects_duplicate_names_case_insensitive() {
    let csv = "name,speed,draft,beam,shipLength,hpReq,fuelRate,baseWeight,load\n".to_string()
        + "Coaster,11,5,14,90,3000,0.22,1500,2500\n"
        + "coaster,12,5,14,90,3000,0.22,1500,2500\n";
    let err = VesselCatalog::from_reader(csv.as_bytes()).expect_err("should reject duplicates");
    assert!(matches!(err, Error::DuplicateVessel { .. }), "{err}");
}
