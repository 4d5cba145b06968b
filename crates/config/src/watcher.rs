use std::path::{Path, PathBuf};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{error, info, warn};

/// Watches the config file for changes and sends a notification on every write.
///
/// The parent directory is watched rather than the file itself, so the
/// watcher keeps working when the file is created after startup or replaced
/// by an editor. Dropping the handle stops the watch task.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// use usage_config::ConfigWatcher;
/// let (_watcher, mut rx) = ConfigWatcher::spawn("/home/user/.claude_usage/config.json");
/// while rx.recv().await.is_some() {
///     println!("config changed, reloading");
/// }
/// # }
/// ```
pub struct ConfigWatcher {
    task: JoinHandle<()>,
}

impl ConfigWatcher {
    /// Spawn a filesystem watcher for `path`.
    /// Returns the watcher handle and a receiver that fires on every detected change.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(watch_loop(path.as_ref().to_path_buf(), tx));
        (Self { task }, rx)
    }
}

impl Drop for ConfigWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<()>) {
    use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
    use std::time::Duration;

    let Some(dir) = path.parent().map(Path::to_path_buf) else {
        error!("Config path '{}' has no parent directory", path.display());
        return;
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        error!("Cannot create '{}': {e}", dir.display());
        return;
    }

    let (sync_tx, mut sync_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = sync_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        error!("Failed to watch '{}': {e}", dir.display());
        return;
    }

    info!("Watching config file: {}", path.display());

    while let Some(event) = sync_rx.recv().await {
        match event {
            Ok(e) => {
                use notify::EventKind::*;
                let touches_config = e.paths.iter().any(|p| p.file_name() == path.file_name());
                if touches_config && matches!(e.kind, Modify(_) | Create(_)) {
                    if tx.send(()).await.is_err() {
                        break; // receiver dropped
                    }
                }
            }
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}
