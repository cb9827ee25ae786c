//! Recording fakes of the native collaborators.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use chrono::{DateTime, TimeZone, Utc};
use tray_shared_util::{MonitorIdentifier, Point};

use crate::*;

pub fn init_logger() {
    let _ = pretty_env_logger::try_init();
}

pub fn at_ms(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).unwrap()
}

pub fn balloon(received_at: DateTime<Utc>, timeout_ms: u32, title: &str) -> NotificationBalloon {
    NotificationBalloon::new(received_at, timeout_ms, BalloonContent { title: title.to_string(), ..Default::default() })
}

pub fn titles(balloons: &[NotificationBalloon]) -> Vec<String> {
    balloons.iter().map(|b| b.content.title.clone()).collect()
}

pub struct FakeShell {
    pub messages: RefCell<Vec<(IconId, IconMessage)>>,
    pub tray_host_claims: RefCell<Vec<MonitorIdentifier>>,
    pub volume_changes: RefCell<Vec<VolumeDirection>>,
    pub tray_window: Cell<Option<TrayWindow>>,
    pub cursor: Cell<Point>,
    pub scale: Cell<f64>,
    pub theme_inverts: Cell<Option<bool>>,
    pub now: Cell<DateTime<Utc>>,
}

impl FakeShell {
    pub fn new() -> Rc<Self> {
        init_logger();
        Rc::new(Self {
            messages: RefCell::default(),
            tray_host_claims: RefCell::default(),
            volume_changes: RefCell::default(),
            tray_window: Cell::new(Some(TrayWindow(0x1004))),
            cursor: Cell::new(Point::new(640, 1050)),
            scale: Cell::new(1.0),
            theme_inverts: Cell::new(Some(false)),
            now: Cell::new(at_ms(1_000_000)),
        })
    }

    pub fn messages_for(&self, icon: IconId) -> Vec<IconMessage> {
        self.messages.borrow().iter().filter(|(id, _)| *id == icon).map(|(_, msg)| *msg).collect()
    }
}

pub fn shell_of(fake: &Rc<FakeShell>) -> Shell {
    Shell {
        tray: fake.clone(),
        arbiter: fake.clone(),
        pointer: fake.clone(),
        volume: fake.clone(),
        theme: fake.clone(),
        clock: fake.clone(),
    }
}

impl NativeTray for FakeShell {
    fn send_icon_message(&self, icon: &IconId, message: IconMessage) {
        self.messages.borrow_mut().push((*icon, message));
    }

    fn find_tray_window(&self, monitor: Option<&MonitorIdentifier>) -> Result<TrayWindow> {
        self.tray_window.get().ok_or_else(|| Error::TrayWindowNotFound { monitor: monitor.cloned() })
    }
}

impl TrayHostArbiter for FakeShell {
    fn set_tray_host(&self, monitor: &MonitorIdentifier) {
        self.tray_host_claims.borrow_mut().push(monitor.clone());
    }
}

impl PointerInfo for FakeShell {
    fn cursor_position(&self) -> Point {
        self.cursor.get()
    }

    fn double_click_time_ms(&self) -> u32 {
        500
    }

    fn display_scale(&self, _monitor: &MonitorIdentifier) -> f64 {
        self.scale.get()
    }
}

impl VolumeControl for FakeShell {
    fn change_volume(&self, _tray: TrayWindow, direction: VolumeDirection) -> Result<()> {
        self.volume_changes.borrow_mut().push(direction);
        Ok(())
    }
}

impl ThemeInfo for FakeShell {
    fn inverts_icons(&self) -> Option<bool> {
        self.theme_inverts.get()
    }
}

impl Clock for FakeShell {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

#[derive(Default)]
pub struct RecordingVisual {
    pub shown: RefCell<Vec<(IconId, NotificationBalloon)>>,
    pub effect_calls: RefCell<Vec<bool>>,
}

impl RecordingVisual {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn shown_titles(&self) -> Vec<String> {
        self.shown.borrow().iter().map(|(_, b)| b.content.title.clone()).collect()
    }
}

pub fn visual_of(visual: &Rc<RecordingVisual>) -> IconVisual {
    IconVisual { renderer: visual.clone(), effects: visual.clone() }
}

impl BalloonRenderer for RecordingVisual {
    fn show(&self, icon: &IconId, balloon: &NotificationBalloon) {
        self.shown.borrow_mut().push((*icon, balloon.clone()));
    }
}

impl IconEffectTarget for RecordingVisual {
    fn set_inverted(&self, inverted: bool) {
        self.effect_calls.borrow_mut().push(inverted);
    }
}
