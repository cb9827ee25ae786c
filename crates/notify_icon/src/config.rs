use std::path::Path;

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use tokio::sync::watch;

use crate::*;

/// User settings the tray reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SmartDefault)]
#[serde(default, rename_all = "camelCase")]
pub struct TrayConfig {
    #[default(InvertIconsMode::ByTheme)]
    pub invert_icons_mode: InvertIconsMode,
}

impl TrayConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read the config at `path`, falling back to the defaults if there is none.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_json_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No tray config at {}, using default settings", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::Io { path: path.to_owned(), source: e }),
        }
    }
}

/// Holds the current [`TrayConfig`] and notifies hosts when it changes.
#[derive(Debug)]
pub struct SettingsWatch {
    tx: watch::Sender<TrayConfig>,
}

impl SettingsWatch {
    pub fn new(config: TrayConfig) -> Self {
        let (tx, _) = watch::channel(config);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<TrayConfig> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> TrayConfig {
        self.tx.borrow().clone()
    }

    /// Change the config. Subscribers only get notified if something actually changed.
    pub fn update(&self, f: impl FnOnce(&mut TrayConfig)) -> bool {
        self.tx.send_if_modified(|config| {
            let before = config.clone();
            f(config);
            *config != before
        })
    }

    pub fn set_invert_icons_mode(&self, mode: InvertIconsMode) -> bool {
        self.update(|config| config.invert_icons_mode = mode)
    }
}

impl Default for SettingsWatch {
    fn default() -> Self {
        Self::new(TrayConfig::default())
    }
}
