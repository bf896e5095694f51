//! Line-oriented text records for control points.
//!
//! Each row is `index,x;y;z,kind`, where `kind` is a [`PathPointKind`] code:
//!
//! ```text
//! 0,0;0;0,2
//! 1,4.5;0;-1,2
//! ```
//!
//! Coordinates use Rust's shortest round-trip float formatting, so a
//! written file reads back to identical positions.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::path::Path;

/// Validity marker stored with each exported point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathPointKind {
    /// A point the producer flagged as unusable.
    Invalid,
    /// A regular control point.
    #[default]
    Normal,
}

impl PathPointKind {
    /// Integer code written to records.
    pub const fn code(self) -> i32 {
        match self {
            PathPointKind::Invalid => 1,
            PathPointKind::Normal => 2,
        }
    }
}

impl TryFrom<i32> for PathPointKind {
    type Error = ExportError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(PathPointKind::Invalid),
            2 => Ok(PathPointKind::Normal),
            other => Err(ExportError::UnknownKind(other)),
        }
    }
}

/// One exported control point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExportRecord {
    pub index: usize,
    pub position: Vec3,
    pub kind: PathPointKind,
}

impl ExportRecord {
    pub fn new(index: usize, position: Vec3, kind: PathPointKind) -> Self {
        Self {
            index,
            position,
            kind,
        }
    }
}

impl fmt::Display for ExportRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Vec3 { x, y, z } = self.position;
        write!(f, "{},{x};{y};{z},{}", self.index, self.kind.code())
    }
}

impl FromStr for ExportRecord {
    type Err = ExportError;

    fn from_str(row: &str) -> Result<Self, Self::Err> {
        parse_record(row)
    }
}

/// Formats one record as a row, without a line terminator.
pub fn format_record(record: &ExportRecord) -> String {
    record.to_string()
}

/// Parses a single row.
pub fn parse_record(row: &str) -> Result<ExportRecord, ExportError> {
    let fields: Vec<&str> = row.trim().split(',').collect();
    let [index, coords, kind] = fields[..] else {
        return Err(ExportError::FieldCount {
            expected: 3,
            found: fields.len(),
        });
    };

    let coords: Vec<&str> = coords.split(';').collect();
    let [x, y, z] = coords[..] else {
        return Err(ExportError::FieldCount {
            expected: 3,
            found: coords.len(),
        });
    };

    Ok(ExportRecord {
        index: parse_number(index)?,
        position: Vec3::new(parse_number(x)?, parse_number(y)?, parse_number(z)?),
        kind: PathPointKind::try_from(parse_number::<i32>(kind)?)?,
    })
}

fn parse_number<T: FromStr>(field: &str) -> Result<T, ExportError> {
    let field = field.trim();
    field
        .parse()
        .map_err(|_| ExportError::InvalidNumber(field.to_string()))
}

/// One [`PathPointKind::Normal`] record per control point of `path`.
pub fn records_from_path(path: &Path) -> Vec<ExportRecord> {
    path.control_points()
        .iter()
        .enumerate()
        .map(|(index, &position)| ExportRecord::new(index, position, PathPointKind::Normal))
        .collect()
}

/// Writes every record as its own line.
pub fn write_records<W: Write>(
    mut writer: W,
    records: impl IntoIterator<Item = ExportRecord>,
) -> Result<(), ExportError> {
    let mut written = 0usize;
    for record in records {
        writeln!(writer, "{record}")?;
        written += 1;
    }
    writer.flush()?;
    log::debug!("wrote {written} path point records");
    Ok(())
}

/// Reads records line by line. Blank lines are skipped.
///
/// Parse failures carry the one-based line number.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<ExportRecord>, ExportError> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = parse_record(&line).map_err(|source| ExportError::Line {
            line: i + 1,
            source: Box::new(source),
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Positions of the [`PathPointKind::Normal`] records, in file order.
pub fn normal_positions(records: &[ExportRecord]) -> Vec<Vec3> {
    records
        .iter()
        .filter(|record| record.kind == PathPointKind::Normal)
        .map(|record| record.position)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathConfig;

    #[test]
    fn test_format_row() {
        let record = ExportRecord::new(3, Vec3::new(1.5, 0.0, -2.0), PathPointKind::Normal);
        assert_eq!(format_record(&record), "3,1.5;0;-2,2");
    }

    #[test]
    fn test_parse_row() {
        let record = parse_record("7,0.25;10;-3.5,1").unwrap();
        assert_eq!(record.index, 7);
        assert_eq!(record.position, Vec3::new(0.25, 10.0, -3.5));
        assert_eq!(record.kind, PathPointKind::Invalid);
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let record: ExportRecord = " 1, 2;3;4 ,2\r".parse().unwrap();
        assert_eq!(record.position, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_record("1,2;3;4"),
            Err(ExportError::FieldCount { expected: 3, found: 2 })
        ));
        assert!(matches!(
            parse_record("1,2;3,2"),
            Err(ExportError::FieldCount { expected: 3, found: 2 })
        ));
        assert!(matches!(
            parse_record("x,2;3;4,2"),
            Err(ExportError::InvalidNumber(ref s)) if s == "x"
        ));
        assert!(matches!(
            parse_record("0,2;3;4,9"),
            Err(ExportError::UnknownKind(9))
        ));
    }

    #[test]
    fn test_every_point_is_exported() {
        let points = [Vec3::ZERO, Vec3::X, Vec3::new(0.1, 0.2, 0.3)];
        let path = Path::from_points(points, PathConfig::default()).unwrap();
        let records = records_from_path(&path);
        assert_eq!(records.len(), 3);

        let mut buffer = Vec::new();
        write_records(&mut buffer, records).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 3);

        let read = read_records(text.as_bytes()).unwrap();
        assert_eq!(normal_positions(&read), points.to_vec());
        assert_eq!(read[2].index, 2);
    }

    #[test]
    fn test_read_skips_blank_lines_and_reports_line() {
        let text = "0,0;0;0,2\n\n1,1;0;0,2\nbad\n";
        let err = read_records(text.as_bytes()).unwrap_err();
        match err {
            ExportError::Line { line, source } => {
                assert_eq!(line, 4);
                assert!(matches!(*source, ExportError::FieldCount { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_normal_positions_drop_invalid() {
        let records = [
            ExportRecord::new(0, Vec3::X, PathPointKind::Normal),
            ExportRecord::new(1, Vec3::Y, PathPointKind::Invalid),
            ExportRecord::new(2, Vec3::Z, PathPointKind::Normal),
        ];
        assert_eq!(normal_positions(&records), vec![Vec3::X, Vec3::Z]);
    }
}
