use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

pub const LOG_FILE_NAME: &str = "range-picker.log";

/// Opens (creating if needed) the append-only log file inside `log_dir`.
pub fn open_log_file(log_dir: &Path) -> Result<(PathBuf, File)> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    Ok((path, file))
}

/// Sends log output to a file so it never draws over the terminal UI.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_file_logger(log_dir: &Path) -> Result<PathBuf> {
    let (path, file) = open_log_file(log_dir)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init()
        .context("Failed to install file logger")?;

    Ok(path)
}

pub fn init_stderr_logger() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .try_init()
        .context("Failed to install stderr logger")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_log_file_is_created_and_appended() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("nested").join("logs");

        let (path, mut file) = open_log_file(&log_dir).unwrap();
        assert_eq!(path, log_dir.join(LOG_FILE_NAME));
        writeln!(file, "first").unwrap();
        drop(file);

        let (_, mut file) = open_log_file(&log_dir).unwrap();
        writeln!(file, "second").unwrap();
        drop(file);

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }
}
