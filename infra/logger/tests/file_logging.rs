use hugo_logger::{FileOutput, LevelFilter, Logger, Rotation};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn json_file_logging_writes_records() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("hugo-file-logging")
        .console(false)
        .level(LevelFilter::INFO)
        .file(FileOutput::new(&log_dir).rotation(Rotation::NEVER).max_files(3).json(true))
        .init()?;

    tracing::info!(id = 42, "Control deleted");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    let first = contents.lines().next().expect("at least one record");
    assert!(first.starts_with('{'), "records should be JSON: {first}");
    assert!(contents.contains("Control deleted"));

    Ok(())
}
