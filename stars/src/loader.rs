use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use glam::Vec3;
use hashbrown::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::point::{Point, StarId};

pub const HEADER_FIELDS: [&str; 5] = ["StarID", "ProperName", "X", "Y", "Z"];
pub const FIELD_DELIMITER: char = ',';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowDefect {
    #[error("Incorrect number of inputs for star")]
    FieldCount(usize),
    #[error("Incorrect format")]
    InvalidId,
    #[error("Incorrect format")]
    InvalidCoordinate,
    #[error("Duplicate star id {0}")]
    DuplicateId(StarId),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Invalid header; needs to have StarID, ProperName, X, Y, Z.")]
    InvalidHeader { header: String },
    #[error("{defect}: {line}")]
    MalformedRow {
        line_number: usize,
        line: String,
        defect: RowDefect,
    },
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read star data: {0}")]
    Read(#[from] std::io::Error),
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;

pub fn load_file(path: impl AsRef<Path>) -> LoadResult<Catalog> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    match load_reader(BufReader::new(file)) {
        Ok(catalog) => {
            info!(
                "Loaded {} stars from {}",
                catalog.len(),
                path.display()
            );
            Ok(catalog)
        }
        Err(err) => {
            warn!("Rejected star data from {}: {}", path.display(), err);
            Err(err)
        }
    }
}

pub fn load_str(source: &str) -> LoadResult<Catalog> {
    load_reader(source.as_bytes())
}

/// Parses a full catalog. Nothing is returned unless every row is valid.
pub fn load_reader<R: BufRead>(reader: R) -> LoadResult<Catalog> {
    let mut lines = reader.lines();

    let header = lines.next().transpose()?.unwrap_or_default();
    if !is_valid_header(&header) {
        debug!("Header mismatch: {:?}", header);
        return Err(LoadError::InvalidHeader { header });
    }

    let mut points = Vec::new();
    let mut seen_ids = HashSet::new();

    // header is line 1
    for (line_number, line) in (2..).zip(lines) {
        let line = line?;
        let point = parse_row(&line).map_err(|defect| LoadError::MalformedRow {
            line_number,
            line: line.clone(),
            defect,
        })?;

        if !seen_ids.insert(point.id()) {
            return Err(LoadError::MalformedRow {
                line_number,
                defect: RowDefect::DuplicateId(point.id()),
                line,
            });
        }
        points.push(point);
    }

    Ok(Catalog::from_points(points))
}

fn is_valid_header(header: &str) -> bool {
    header.split(FIELD_DELIMITER).eq(HEADER_FIELDS)
}

fn parse_row(line: &str) -> Result<Point, RowDefect> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    let [id, name, x, y, z] = fields.as_slice() else {
        return Err(RowDefect::FieldCount(fields.len()));
    };

    let id: StarId = id.parse().map_err(|_| RowDefect::InvalidId)?;
    let position = Vec3::new(
        parse_coordinate(x)?,
        parse_coordinate(y)?,
        parse_coordinate(z)?,
    );

    Ok(Point::new(id, *name, position))
}

fn parse_coordinate(field: &str) -> Result<f32, RowDefect> {
    field
        .trim()
        .parse::<f32>()
        .map_err(|_| RowDefect::InvalidCoordinate)
}
