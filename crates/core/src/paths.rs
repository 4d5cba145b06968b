use std::path::PathBuf;

/// Directory under `$HOME` holding both persisted files.
pub const APP_DIR_NAME: &str = ".claude_usage";

/// `~/.claude_usage`, or `./.claude_usage` when no home directory resolves.
pub fn app_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| {
        tracing::warn!("Home directory not found; storing data in the working directory.");
        PathBuf::from(".")
    });
    home.join(APP_DIR_NAME)
}

/// Default location of `state.json`.
pub fn state_path() -> PathBuf {
    app_dir().join("state.json")
}
