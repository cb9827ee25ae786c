use std::path::PathBuf;

use thiserror::Error;
use tray_shared_util::MonitorIdentifier;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No tray window found (monitor: {monitor:?})")]
    TrayWindowNotFound { monitor: Option<MonitorIdentifier> },
    #[error("Volume control failed: {0}")]
    VolumeControl(String),
    #[error("Failed to parse tray config")]
    Config(#[from] serde_json::Error),
    #[error("Failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
