//! Appends normalized statement blocks to the running expense report.

use crate::Result;
use anyhow::{bail, Context};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// The directory inside the statements directory where the report lives. It must already exist;
/// this program never creates it.
const OUTPUT_DIR: &str = "output";

/// The report filename.
const OUTPUT_FILE: &str = "output.csv";

/// Appends one source statement's block to `output/output.csv` next to the source file: a header
/// naming the source, then each line verbatim. The report file is created on first use but after
/// that it is only ever appended to, never truncated. Returns the number of lines written.
pub(crate) fn append(source: &Path, lines: &[String]) -> Result<usize> {
    let dir = match source.parent() {
        Some(dir) => dir,
        None => bail!("Statement path {} has no parent directory", source.display()),
    };
    let filename = match source.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => bail!("Statement path {} has no filename", source.display()),
    };
    let out_path = dir.join(OUTPUT_DIR).join(OUTPUT_FILE);
    info!("Writing records to output file {}", out_path.display());

    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&out_path)
        .with_context(|| format!("Unable to open output file {}", out_path.display()))?;

    file.write_all(format!("\n{filename}\n\n").as_bytes())
        .with_context(|| format!("Unable to write to output file {}", out_path.display()))?;

    let mut written = 0;
    for line in lines {
        debug!("Writing record {}", line.trim_end());
        file.write_all(line.as_bytes()).with_context(|| {
            format!(
                "Unable to write record '{}' to {}",
                line.trim_end(),
                out_path.display()
            )
        })?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::StatementDir;

    #[test]
    fn test_append_block_format() {
        let dir = StatementDir::new();
        let lines = vec![String::from("01/15/2024,COFFEE,4.50\n")];
        let written = append(&dir.root().join("chase_jan.csv"), &lines).unwrap();
        assert_eq!(written, 1);
        assert_eq!(dir.report(), "\nchase_jan.csv\n\n01/15/2024,COFFEE,4.50\n");
    }

    #[test]
    fn test_append_never_truncates() {
        let dir = StatementDir::new();
        let lines = vec![String::from("01/15/2024,COFFEE,4.50\n")];
        append(&dir.root().join("chase_jan.csv"), &lines).unwrap();
        append(&dir.root().join("chase_jan.csv"), &lines).unwrap();
        let block = "\nchase_jan.csv\n\n01/15/2024,COFFEE,4.50\n";
        assert_eq!(dir.report(), block.repeat(2));
    }

    #[test]
    fn test_append_missing_output_dir_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let lines = vec![String::from("01/15/2024,COFFEE,4.50\n")];
        assert!(append(&temp.path().join("chase_jan.csv"), &lines).is_err());
    }

    #[test]
    fn test_append_empty_lines_writes_only_the_header() {
        let dir = StatementDir::new();
        let written = append(&dir.root().join("chase_jan.csv"), &[]).unwrap();
        assert_eq!(written, 0);
        assert_eq!(dir.report(), "\nchase_jan.csv\n\n");
    }
}
