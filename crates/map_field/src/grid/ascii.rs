//! Parser for ASCII grid payloads.
//!
//! A payload is a six-line header (`ncols`, `nrows`, `xllcorner`, `yllcorner`,
//! `cellsize`, `nodata_value`, each as `KEY value`) followed by `nrows` lines
//! of `ncols` whitespace-separated numbers, row 0 being the northernmost.
//! Parsing is all-or-nothing: any malformed header line, short or long data
//! row, or unparsable number fails with [`Error::Format`].
use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::{GridDescriptor, RasterGrid};

const HEADER_KEYS: [&str; 6] = [
    "ncols",
    "nrows",
    "xllcorner",
    "yllcorner",
    "cellsize",
    "nodata_value",
];

/// Parses an ASCII grid payload into a [`RasterGrid`].
pub fn parse_ascii(payload: &str) -> Result<RasterGrid> {
    let mut lines = payload.lines().map(str::trim).filter(|l| !l.is_empty());

    let mut header = [0.0f64; 6];
    for (slot, key) in header.iter_mut().zip(HEADER_KEYS) {
        let line = lines
            .next()
            .ok_or_else(|| Error::Format(format!("missing header line '{key}'")))?;
        *slot = parse_header_line(line, key)?;
    }

    let descriptor = GridDescriptor {
        ncols: parse_dimension(header[0], "ncols")?,
        nrows: parse_dimension(header[1], "nrows")?,
        xllcorner: header[2],
        yllcorner: header[3],
        cellsize: header[4],
        nodata_value: header[5],
    };
    if !(descriptor.cellsize > 0.0) {
        return Err(Error::Format(format!(
            "cellsize must be positive, got {}",
            descriptor.cellsize
        )));
    }

    let mut values = Vec::with_capacity(descriptor.len());
    for row in 0..descriptor.nrows {
        let line = lines
            .next()
            .ok_or_else(|| Error::Format(format!("missing data row {row}")))?;
        let before = values.len();
        for token in line.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| {
                Error::Format(format!("row {row}: cannot parse value '{token}'"))
            })?;
            values.push(value);
        }
        let count = values.len() - before;
        if count != descriptor.ncols {
            return Err(Error::Format(format!(
                "row {row} has {count} values, expected {}",
                descriptor.ncols
            )));
        }
    }
    if lines.next().is_some() {
        return Err(Error::Format(format!(
            "unexpected data after {} rows",
            descriptor.nrows
        )));
    }

    debug!(
        ncols = descriptor.ncols,
        nrows = descriptor.nrows,
        "parsed ASCII grid"
    );
    RasterGrid::new(descriptor, values)
}

fn parse_header_line(line: &str, key: &str) -> Result<f64> {
    let mut tokens = line.split_whitespace();
    let (Some(found), Some(value), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(Error::Format(format!(
            "header line '{line}' is not 'KEY value'"
        )));
    };
    if !found.eq_ignore_ascii_case(key) {
        return Err(Error::Format(format!(
            "expected header key '{key}', found '{found}'"
        )));
    }
    value
        .parse()
        .map_err(|_| Error::Format(format!("header '{key}': cannot parse value '{value}'")))
}

fn parse_dimension(value: f64, key: &str) -> Result<usize> {
    if value.fract() != 0.0 || value < 1.0 || value > usize::MAX as f64 {
        return Err(Error::Format(format!(
            "header '{key}' must be a positive integer, got {value}"
        )));
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> String {
        [
            "ncols 3",
            "nrows 2",
            "xllcorner -3.77",
            "yllcorner 43.46",
            "cellsize 0.5",
            "nodata_value -9999",
            "1.0 2.0 3.0",
            "4.0 -9999 6.0",
        ]
        .join("\n")
    }

    #[test]
    fn parses_header_and_values() {
        let grid = parse_ascii(&payload()).expect("valid payload");
        let d = grid.descriptor();
        assert_eq!((d.ncols, d.nrows), (3, 2));
        assert_eq!(d.xllcorner, -3.77);
        assert_eq!(d.yllcorner, 43.46);
        assert_eq!(d.cellsize, 0.5);
        assert_eq!(d.nodata_value, -9999.0);
        assert_eq!(grid.value_at(0, 0).unwrap(), 1.0);
        assert_eq!(grid.value_at(1, 2).unwrap(), 6.0);
    }

    #[test]
    fn accepts_uppercase_keys_and_blank_lines() {
        let upper = payload().replace("nodata_value", "NODATA_value") + "\n\n";
        assert!(parse_ascii(&upper).is_ok());
    }

    #[test]
    fn rejects_missing_header_key() {
        let broken = payload().replace("cellsize 0.5", "cell 0.5");
        assert!(matches!(parse_ascii(&broken), Err(Error::Format(_))));
    }

    #[test]
    fn rejects_short_data_row() {
        let broken = payload().replace("1.0 2.0 3.0", "1.0 2.0");
        assert!(matches!(parse_ascii(&broken), Err(Error::Format(_))));
    }

    #[test]
    fn rejects_long_data_row() {
        let broken = payload().replace("1.0 2.0 3.0", "1.0 2.0 3.0 3.5");
        assert!(matches!(parse_ascii(&broken), Err(Error::Format(_))));
    }

    #[test]
    fn rejects_non_numeric_value() {
        let broken = payload().replace("6.0", "six");
        assert!(matches!(parse_ascii(&broken), Err(Error::Format(_))));
    }

    #[test]
    fn rejects_missing_rows_and_trailing_rows() {
        let mut rows = payload();
        rows.push_str("\n7.0 8.0 9.0");
        assert!(matches!(parse_ascii(&rows), Err(Error::Format(_))));

        let short = payload().replace("\n4.0 -9999 6.0", "");
        assert!(matches!(parse_ascii(&short), Err(Error::Format(_))));
    }

    #[test]
    fn rejects_fractional_dimensions() {
        let broken = payload().replace("ncols 3", "ncols 3.5");
        assert!(matches!(parse_ascii(&broken), Err(Error::Format(_))));
    }

    #[test]
    fn rejects_non_positive_cellsize() {
        let broken = payload().replace("cellsize 0.5", "cellsize 0");
        assert!(matches!(parse_ascii(&broken), Err(Error::Format(_))));
    }
}
