use crate::error::{Result, SumcheckError};
use std::fs;
use std::path::{Path, PathBuf};

pub fn render_summary(sum: i64, input: &str) -> String {
    format!("Sum: {sum}\nInputData: {input}\n")
}

/// Writes the summary next to `path` and renames it into place.
pub fn write_summary(path: &Path, sum: i64, input: &str) -> Result<()> {
    let write_err = |source: std::io::Error| SumcheckError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let tmp = tmp_path(path);
    fs::write(&tmp, render_summary(sum, input).as_bytes()).map_err(write_err)?;
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(source));
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
