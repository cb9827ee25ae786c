use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use chrono::{DateTime, TimeDelta, Utc};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use tray_shared_util::{MonitorIdentifier, Rect};
use uuid::Uuid;

/// Stable identity of a tray icon, as registered with the native tray.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
pub struct IconId(pub Uuid);

impl IconId {
    /// The system volume icon. Scrolling over it changes the volume.
    pub const VOLUME: IconId = IconId(Uuid::from_u128(0x7820ae73_23e3_4229_82c1_e41cb67d5b9c));

    pub const fn from_u128(v: u128) -> Self {
        IconId(Uuid::from_u128(v))
    }
}

/// How the user configured an icon to be shown in the notification area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString)]
pub enum NotifyIconBehavior {
    #[default]
    Show,
    Hide,
    AlwaysHide,
    Remove,
}

impl NotifyIconBehavior {
    /// Whether balloons of an icon with this behavior may ever be shown.
    pub fn allows_balloons(self) -> bool {
        !matches!(self, Self::AlwaysHide | Self::Remove)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum BalloonIcon {
    #[default]
    None,
    Info,
    Warning,
    Error,
    User,
}

/// What a balloon shows. Scheduling never looks inside this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalloonContent {
    pub title: String,
    pub info: String,
    pub icon: BalloonIcon,
}

/// A notification balloon raised by the application owning a tray icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationBalloon {
    pub received_at: DateTime<Utc>,
    pub timeout_ms: u32,
    pub content: BalloonContent,
}

impl NotificationBalloon {
    pub fn new(received_at: DateTime<Utc>, timeout_ms: u32, content: BalloonContent) -> Self {
        Self { received_at, timeout_ms, content }
    }

    /// `None` if the expiry point is not representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.received_at.checked_add_signed(TimeDelta::milliseconds(i64::from(self.timeout_ms)))
    }

    /// A balloon is still valid strictly before `received_at + timeout_ms`.
    pub fn is_unexpired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().map_or(true, |expiry| expiry > now)
    }
}

/// A live "balloon shown" event. The `handled` flag is shared by every observer of this one event.
#[derive(Debug)]
pub struct BalloonShownEvent {
    pub balloon: NotificationBalloon,
    pub handled: bool,
}

impl BalloonShownEvent {
    pub fn new(balloon: NotificationBalloon) -> Self {
        Self { balloon, handled: false }
    }
}

/// One monitor-bound instance of the taskbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    pub monitor: MonitorIdentifier,
    pub is_primary: bool,
}

impl HostContext {
    pub fn new(monitor: MonitorIdentifier, is_primary: bool) -> Self {
        Self { monitor, is_primary }
    }
}

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, Display)]
#[display("subscription#{_0}")]
pub struct SubscriptionId(u64);

pub type BalloonHandler = Rc<dyn Fn(&mut BalloonShownEvent)>;

pub type TrayIconHandle = Rc<RefCell<TrayIcon>>;
pub type WeakTrayIcon = Weak<RefCell<TrayIcon>>;

/// A tray icon registered by some other application.
///
/// Icons are owned by the [`TrayRegistry`](crate::TrayRegistry). Hosts only ever write the
/// `placement` and drain `missed_notifications`.
pub struct TrayIcon {
    pub id: IconId,
    /// Last known position on screen, in device pixels. Updated whenever the pointer enters the icon.
    pub placement: Rect,
    pub behavior: NotifyIconBehavior,
    /// False for icons that are already drawn for a specific background and must not be inverted.
    pub invertible: bool,
    /// Balloons that nobody displayed, in arrival order.
    pub missed_notifications: Vec<NotificationBalloon>,

    balloon_handlers: Vec<(SubscriptionId, BalloonHandler)>,
    next_subscription: u64,
}

impl TrayIcon {
    pub fn new(id: IconId) -> Self {
        Self {
            id,
            placement: Rect::default(),
            behavior: NotifyIconBehavior::default(),
            invertible: true,
            missed_notifications: Vec::new(),
            balloon_handlers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn with_behavior(mut self, behavior: NotifyIconBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_invertible(mut self, invertible: bool) -> Self {
        self.invertible = invertible;
        self
    }

    pub fn into_handle(self) -> TrayIconHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn subscribe_balloons(&mut self, handler: BalloonHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.balloon_handlers.push((id, handler));
        id
    }

    /// Returns false if there was no such subscription.
    pub fn unsubscribe_balloons(&mut self, id: SubscriptionId) -> bool {
        let before = self.balloon_handlers.len();
        self.balloon_handlers.retain(|(sub, _)| *sub != id);
        self.balloon_handlers.len() != before
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.balloon_handlers.iter().any(|(sub, _)| *sub == id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.balloon_handlers.len()
    }

    /// Index of the earliest missed balloon that hasn't expired yet.
    pub fn first_unexpired_missed(&self, now: DateTime<Utc>) -> Option<usize> {
        self.missed_notifications.iter().position(|balloon| balloon.is_unexpired(now))
    }
}

impl fmt::Debug for TrayIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrayIcon")
            .field("id", &self.id)
            .field("placement", &self.placement)
            .field("behavior", &self.behavior)
            .field("invertible", &self.invertible)
            .field("missed_notifications", &self.missed_notifications)
            .field("subscribers", &self.balloon_handlers.len())
            .finish()
    }
}

/// Hand a live balloon event to every current subscriber of the icon, in subscription order.
///
/// No borrow of the icon is held while a handler runs, so handlers may read the icon or
/// unsubscribe. A handler that got unsubscribed by an earlier one in the same dispatch is skipped.
pub fn dispatch_balloon_shown(icon: &TrayIconHandle, event: &mut BalloonShownEvent) {
    let handlers: Vec<(SubscriptionId, BalloonHandler)> = icon.borrow().balloon_handlers.clone();
    for (id, handler) in handlers {
        if !icon.borrow().is_subscribed(id) {
            continue;
        }
        handler(event);
    }
}
