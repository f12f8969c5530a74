use std::path::PathBuf;

const APP_DIR: &str = "shiftshot";

/// Returns the configuration directory: `<config_dir>/shiftshot/`
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Returns the path of the configuration file.
pub fn config_file() -> PathBuf {
    config_dir().join("config.json")
}

/// Returns the path of the stored OAuth token file.
pub fn token_file() -> PathBuf {
    config_dir().join("token.json")
}

/// Returns the scratch directory for intermediate images:
/// `<data_local_dir>/shiftshot/scratch/`
pub fn scratch_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("scratch")
}

/// Returns the path the screenshot tool writes the weekly schedule to.
pub fn schedule_image() -> PathBuf {
    scratch_dir().join("schedule.png")
}

/// Ensures the config and scratch directories exist. Call at startup.
pub fn ensure_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(config_dir())?;
    std::fs::create_dir_all(scratch_dir())?;
    Ok(())
}
