use serde::{Deserialize, Serialize};

use crate::*;

/// When icons get drawn inverted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum InvertIconsMode {
    Never,
    Always,
    /// Only if the active theme asks for it.
    #[default]
    ByTheme,
}

pub fn should_invert(icon: &TrayIcon, theme_inverts_icons: bool, mode: InvertIconsMode) -> bool {
    if mode == InvertIconsMode::Never || !icon.invertible {
        return false;
    }
    theme_inverts_icons || mode == InvertIconsMode::Always
}

/// A theme that doesn't specify anything doesn't invert.
pub fn theme_inverts_icons(theme: &dyn ThemeInfo) -> bool {
    theme.inverts_icons().unwrap_or(false)
}

/// Tracks whether the inversion filter is currently applied to one visual.
#[derive(Debug, Default)]
pub struct EffectState {
    inverted: bool,
}

impl EffectState {
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Apply or remove the filter. Returns false, without touching the target, if it's already in
    /// the desired state.
    pub fn apply(&mut self, desired: bool, target: &dyn IconEffectTarget) -> bool {
        if self.inverted == desired {
            return false;
        }
        log::debug!("{} icon inversion", if desired { "Applying" } else { "Removing" });
        target.set_inverted(desired);
        self.inverted = desired;
        true
    }
}
