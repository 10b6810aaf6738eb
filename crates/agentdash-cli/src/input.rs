//! Reading command input from a file or stdin.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read the whole input. A path of `-` means stdin.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read input file: {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{\"success\": true}}").expect("write");
        let content = read_input(file.path()).expect("read");
        assert_eq!(content, "{\"success\": true}");
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.json");
        let err = read_input(&missing).unwrap_err();
        assert!(format!("{err:#}").contains("absent.json"));
    }
}
