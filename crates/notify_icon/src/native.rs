//! Everything this crate needs from the native shell, the theme and the clock.
//!
//! The notification area protocol itself is owned by the platform layer. These traits only
//! describe the calls hosts make into it, so that they can be swapped out in tests.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use derive_more::{Display, From};
use tray_shared_util::{MonitorIdentifier, Point};

use crate::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    XButton1,
    XButton2,
}

/// A message forwarded to the application owning an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconMessage {
    MouseDown { button: MouseButton, cursor: Point, double_click_time_ms: u32 },
    MouseUp { button: MouseButton, cursor: Point, double_click_time_ms: u32 },
    MouseEnter { cursor: Point },
    MouseLeave { cursor: Point },
    MouseMove { cursor: Point },
}

/// Opaque handle of the native tray window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From)]
#[display("{_0:#x}")]
pub struct TrayWindow(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum VolumeDirection {
    Up,
    Down,
}

pub trait NativeTray {
    fn send_icon_message(&self, icon: &IconId, message: IconMessage);

    /// Look up the tray window, either the one on `monitor` or the global one.
    fn find_tray_window(&self, monitor: Option<&MonitorIdentifier>) -> Result<TrayWindow>;
}

/// Arbitrates which taskbar instance currently owns the tray. Claiming is fire-and-forget.
pub trait TrayHostArbiter {
    fn set_tray_host(&self, monitor: &MonitorIdentifier);
}

pub trait PointerInfo {
    /// Current cursor position in device pixels.
    fn cursor_position(&self) -> Point;
    fn double_click_time_ms(&self) -> u32;
    /// Device pixels per logical pixel on `monitor`.
    fn display_scale(&self, monitor: &MonitorIdentifier) -> f64;
}

/// The step by which the volume changes is up to the implementation.
pub trait VolumeControl {
    fn change_volume(&self, tray: TrayWindow, direction: VolumeDirection) -> Result<()>;
}

pub trait ThemeInfo {
    /// `None` if the current theme doesn't say.
    fn inverts_icons(&self) -> Option<bool>;
}

/// Shows balloons next to the icon on one host. Showing can't be cancelled once started.
pub trait BalloonRenderer {
    fn show(&self, icon: &IconId, balloon: &NotificationBalloon);
}

/// The visual an icon is drawn with on one host.
pub trait IconEffectTarget {
    fn set_inverted(&self, inverted: bool);
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Shell-wide collaborators, shared by every host.
#[derive(Clone)]
pub struct Shell {
    pub tray: Rc<dyn NativeTray>,
    pub arbiter: Rc<dyn TrayHostArbiter>,
    pub pointer: Rc<dyn PointerInfo>,
    pub volume: Rc<dyn VolumeControl>,
    pub theme: Rc<dyn ThemeInfo>,
    pub clock: Rc<dyn Clock>,
}

/// Per-host, per-icon visual collaborators.
#[derive(Clone)]
pub struct IconVisual {
    pub renderer: Rc<dyn BalloonRenderer>,
    pub effects: Rc<dyn IconEffectTarget>,
}
