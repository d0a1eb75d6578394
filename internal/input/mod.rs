use crate::config::DataSource;
use crate::error::{Result, SumcheckError};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Returns the raw input text for the selected data source.
pub fn read_input(source: DataSource, input_file: Option<&Path>) -> Result<String> {
    match source {
        DataSource::File => {
            let path = input_file.ok_or(SumcheckError::MissingField("input_file"))?;
            read_from_file(path)
        }
        DataSource::Stdin => read_from(io::stdin().lock()),
    }
}

pub fn read_from_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SumcheckError::InputRead {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_from<R: Read>(mut reader: R) -> Result<String> {
    let mut data = String::new();
    reader
        .read_to_string(&mut data)
        .map_err(SumcheckError::Stdin)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_from_file_returns_raw_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        fs::write(&path, "first line\nsecond line\n").unwrap();

        let data = read_input(DataSource::File, Some(&path)).unwrap();
        assert_eq!(data, "first line\nsecond line\n");
    }

    #[test]
    fn test_missing_input_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");

        let err = read_input(DataSource::File, Some(&path)).unwrap_err();
        match err {
            SumcheckError::InputRead { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_file_source_without_path() {
        let err = read_input(DataSource::File, None).unwrap_err();
        assert!(matches!(err, SumcheckError::MissingField("input_file")));
    }

    #[test]
    fn test_read_from_reader_until_eof() {
        let data = read_from(Cursor::new("1 2 3\n4 5")).unwrap();
        assert_eq!(data, "1 2 3\n4 5");
    }

    #[test]
    fn test_read_from_rejects_invalid_utf8() {
        let err = read_from(Cursor::new(vec![0xff, 0xfe])).unwrap_err();
        assert!(matches!(err, SumcheckError::Stdin(_)));
    }
}
