//! Named-array JSON integral files.

use std::fs;

use fermiq_chem::error::ChemError;
use fermiq_chem::integrals::{EriConvention, IntegralSet};
use tempfile::tempdir;

#[test]
fn save_then_load_preserves_every_field() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("h2.json");
    let ints = IntegralSet::h2_reference();
    ints.save(&path).unwrap();

    let back = IntegralSet::load(&path).unwrap();
    assert_eq!(back, ints);
}

#[test]
fn optional_fields_default() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("min.json");
    fs::write(
        &path,
        r#"{"h1": [[-1.0]], "eri": [[[[0.5]]]], "n_orb": 1, "nelec": 1}"#,
    )
    .unwrap();

    let ints = IntegralSet::load(&path).unwrap();
    assert_eq!(ints.e_nuc, 0.0);
    assert_eq!(ints.convention, EriConvention::Chemist);
    assert_eq!(ints.h1[[0, 0]], -1.0);
}

#[test]
fn physicist_convention_is_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("phys.json");
    fs::write(
        &path,
        r#"{"h1": [[0.0]], "eri": [[[[1.0]]]], "n_orb": 1, "nelec": 0, "convention": "physicist"}"#,
    )
    .unwrap();
    let ints = IntegralSet::load(&path).unwrap();
    assert_eq!(ints.convention, EriConvention::Physicist);
}

#[test]
fn missing_key_is_named() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"h1": [[0.0]], "n_orb": 1, "nelec": 1}"#).unwrap();

    match IntegralSet::load(&path) {
        Err(ChemError::MissingField(key)) => assert_eq!(key, "eri"),
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn wrong_shape_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shape.json");
    fs::write(
        &path,
        r#"{"h1": [[0.0, 1.0]], "eri": [[[[0.5]]]], "n_orb": 1, "nelec": 1}"#,
    )
    .unwrap();
    assert!(matches!(
        IntegralSet::load(&path),
        Err(ChemError::ShapeMismatch { what: "h1", .. })
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        IntegralSet::load(dir.path().join("nope.json")),
        Err(ChemError::Io(_))
    ));
}
