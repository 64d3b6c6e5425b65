use std::io::Write;

use glam::Vec3;

use common::test_utils::test_resource_path;

use crate::loader::{load_file, load_reader, load_str, LoadError, RowDefect};
use crate::point::StarId;

const HEADER_MESSAGE: &str = "Invalid header; needs to have StarID, ProperName, X, Y, Z.";

#[test]
fn loads_ten_star_file() -> anyhow::Result<()> {
    let catalog = load_file(test_resource_path("ten-star.csv"))?;
    assert_eq!(catalog.len(), 10);

    let ids: Vec<i64> = catalog.ids().map(i64::from).collect();
    assert_eq!(
        ids,
        vec![0, 1, 2, 3, 3759, 70667, 71454, 71457, 87666, 118721]
    );

    let sol = &catalog.points()[0];
    assert_eq!(sol.name(), "Sol");
    assert_eq!(sol.position(), Vec3::ZERO);

    let proxima = catalog.point_by_id(StarId::new(70667)).unwrap();
    assert_eq!(proxima.name(), "Proxima Centauri");
    assert_eq!(proxima.x(), -0.47175);
    assert_eq!(proxima.y(), -0.36132);
    assert_eq!(proxima.z(), -1.15037);

    let unnamed = catalog.point_by_id(StarId::new(118721)).unwrap();
    assert_eq!(unnamed.name(), "");

    let psc = catalog.point_by_id(StarId::new(3759)).unwrap();
    assert_eq!(psc.name(), "96 G. Psc");

    Ok(())
}

#[test]
fn rejects_wrong_header_label() {
    let err = load_file(test_resource_path("invalid-star-header.csv")).unwrap_err();

    assert_eq!(err.to_string(), HEADER_MESSAGE);
    for field in ["StarID", "ProperName", "X", "Y", "Z"] {
        assert!(err.to_string().contains(field));
    }
    match err {
        LoadError::InvalidHeader { header } => assert_eq!(header, "StarID,Name,X,Y,Z"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_empty_source_as_invalid_header() {
    let err = load_str("").unwrap_err();
    assert!(matches!(err, LoadError::InvalidHeader { ref header } if header.is_empty()));
    assert_eq!(err.to_string(), HEADER_MESSAGE);
}

#[test]
fn rejects_row_with_four_fields() {
    let err = load_file(test_resource_path("missing-coordinate.csv")).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Incorrect number of inputs for star: 1,Lonely,282.43485,0.00449"
    );
    match err {
        LoadError::MalformedRow {
            line_number,
            line,
            defect,
        } => {
            assert_eq!(line_number, 3);
            assert_eq!(line, "1,Lonely,282.43485,0.00449");
            assert_eq!(defect, RowDefect::FieldCount(4));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_unparsable_coordinate() {
    let err = load_file(test_resource_path("bad-coordinate.csv")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Incorrect format: 1,Lonely,282.43485,north,5.36884"
    );
    assert!(matches!(
        err,
        LoadError::MalformedRow {
            defect: RowDefect::InvalidCoordinate,
            ..
        }
    ));
}

#[test]
fn rejects_unparsable_id() {
    let err = load_str("StarID,ProperName,X,Y,Z\nabc,Sol,0,0,0\n").unwrap_err();
    assert_eq!(err.to_string(), "Incorrect format: abc,Sol,0,0,0");
}

#[test]
fn rejects_duplicate_ids() {
    let err = load_str("StarID,ProperName,X,Y,Z\n1,A,0,0,0\n2,B,1,1,1\n1,C,2,2,2\n").unwrap_err();
    match err {
        LoadError::MalformedRow {
            line_number,
            line,
            defect,
        } => {
            assert_eq!(line_number, 4);
            assert_eq!(line, "1,C,2,2,2");
            assert_eq!(defect, RowDefect::DuplicateId(StarId::new(1)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn blank_line_is_malformed() {
    let err = load_str("StarID,ProperName,X,Y,Z\n1,A,0,0,0\n\n2,B,1,1,1\n").unwrap_err();
    assert!(matches!(
        err,
        LoadError::MalformedRow {
            line_number: 3,
            defect: RowDefect::FieldCount(1),
            ..
        }
    ));
}

#[test]
fn trailing_delimiter_is_an_extra_field() {
    let source = "StarID,ProperName,X,Y,Z\n1,A,0,0,0,\n";
    let err = load_str(source).unwrap_err();
    assert!(matches!(
        err,
        LoadError::MalformedRow {
            line_number: 2,
            defect: RowDefect::FieldCount(6),
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "Incorrect number of inputs for star: 1,A,0,0,0,"
    );
}

#[test]
fn row_defect_messages() {
    assert_eq!(
        RowDefect::FieldCount(4).to_string(),
        "Incorrect number of inputs for star"
    );
    assert_eq!(RowDefect::InvalidId.to_string(), "Incorrect format");
    assert_eq!(RowDefect::InvalidCoordinate.to_string(), "Incorrect format");
    assert_eq!(
        RowDefect::DuplicateId(StarId::new(8)).to_string(),
        "Duplicate star id 8"
    );
}

#[test]
fn header_only_source_is_an_empty_catalog() -> anyhow::Result<()> {
    let catalog = load_file(test_resource_path("header-only.csv"))?;
    assert!(catalog.is_empty());
    Ok(())
}

#[test]
fn accepts_crlf_line_endings() -> anyhow::Result<()> {
    let catalog = load_reader("StarID,ProperName,X,Y,Z\r\n7,Vega,1,2,3\r\n".as_bytes())?;
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.points()[0].z(), 3.0);
    Ok(())
}

#[test]
fn duplicate_names_are_kept() -> anyhow::Result<()> {
    let catalog = load_file(test_resource_path("duplicate-names.csv"))?;
    let twins = catalog
        .points()
        .iter()
        .filter(|point| point.name() == "Twin")
        .count();
    assert_eq!(twins, 2);
    Ok(())
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");

    let err = load_file(&path).unwrap_err();
    match &err {
        LoadError::Open { path: reported, .. } => assert_eq!(reported, &path),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn loads_from_temporary_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "StarID,ProperName,X,Y,Z")?;
    for id in 0..25 {
        writeln!(file, "{id},Star {id},{id}.5,-{id},0")?;
    }
    file.flush()?;

    let catalog = load_file(file.path())?;
    assert_eq!(catalog.len(), 25);
    let last = &catalog.points()[24];
    assert_eq!(last.name(), "Star 24");
    assert_eq!(last.position(), Vec3::new(24.5, -24.0, 0.0));
    Ok(())
}
