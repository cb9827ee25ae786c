use tray_shared_util::{LogicalSize, MonitorIdentifier, Point, Rect};

use crate::*;

/// Where the visual surface of an icon is on screen: origin in device pixels, size in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    pub origin: Point,
    pub size: LogicalSize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    Enter(SurfaceGeometry),
    Leave,
    Move,
    /// Positive deltas scroll up.
    Wheel { delta: i32 },
}

/// A pointer event on the surface of an icon. Routing always marks it as handled.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub input: PointerInput,
    pub handled: bool,
}

impl InputEvent {
    pub fn new(input: PointerInput) -> Self {
        Self { input, handled: false }
    }
}

/// Turns pointer input on one host into messages for the application owning the icon.
#[derive(Clone)]
pub struct InputRouter {
    monitor: MonitorIdentifier,
    shell: Shell,
}

impl InputRouter {
    pub fn new(monitor: MonitorIdentifier, shell: Shell) -> Self {
        Self { monitor, shell }
    }

    /// Route `event` for `icon`. Without an icon the event is swallowed.
    pub fn route(&self, icon: Option<&TrayIconHandle>, event: &mut InputEvent) {
        event.handled = true;
        let Some(icon) = icon else {
            log::trace!("Dropping {:?}, no icon attached", event.input);
            return;
        };

        match event.input {
            PointerInput::ButtonDown(button) => {
                self.shell.arbiter.set_tray_host(&self.monitor);
                self.send(icon, IconMessage::MouseDown {
                    button,
                    cursor: self.shell.pointer.cursor_position(),
                    double_click_time_ms: self.shell.pointer.double_click_time_ms(),
                });
            }
            PointerInput::ButtonUp(button) => {
                self.send(icon, IconMessage::MouseUp {
                    button,
                    cursor: self.shell.pointer.cursor_position(),
                    double_click_time_ms: self.shell.pointer.double_click_time_ms(),
                });
            }
            PointerInput::Enter(surface) => {
                // the native tray answers icon position queries from this, and it goes stale
                // whenever the taskbar layout changes
                let scale = self.shell.pointer.display_scale(&self.monitor);
                icon.borrow_mut().placement = Rect::from_origin_and_size(surface.origin, surface.size, scale);
                self.send(icon, IconMessage::MouseEnter { cursor: self.shell.pointer.cursor_position() });
            }
            PointerInput::Leave => {
                self.send(icon, IconMessage::MouseLeave { cursor: self.shell.pointer.cursor_position() });
            }
            PointerInput::Move => {
                self.send(icon, IconMessage::MouseMove { cursor: self.shell.pointer.cursor_position() });
            }
            PointerInput::Wheel { delta } => {
                if !self.handle_wheel(icon, delta) {
                    log::trace!("Ignoring wheel event with delta {}", delta);
                }
            }
        }
    }

    /// Returns whether the icon has a wheel gesture, regardless of whether it went through.
    fn handle_wheel(&self, icon: &TrayIconHandle, delta: i32) -> bool {
        if icon.borrow().id != IconId::VOLUME {
            return false;
        }
        let direction = if delta > 0 { VolumeDirection::Up } else { VolumeDirection::Down };
        let result =
            self.shell.tray.find_tray_window(None).and_then(|tray| self.shell.volume.change_volume(tray, direction));
        if let Err(e) = result {
            log::debug!("Could not change volume {}: {}", direction, e);
        }
        true
    }

    fn send(&self, icon: &TrayIconHandle, message: IconMessage) {
        let id = icon.borrow().id;
        self.shell.tray.send_icon_message(&id, message);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use pretty_assertions::assert_eq;

    fn router(shell: &std::rc::Rc<FakeShell>) -> InputRouter {
        InputRouter::new(MonitorIdentifier::Numeric(0), shell_of(shell))
    }

    #[test]
    fn test_button_down_claims_tray_host_and_forwards() {
        let shell = FakeShell::new();
        let icon = TrayIcon::new(IconId::from_u128(7)).into_handle();
        let router = router(&shell);

        let mut down = InputEvent::new(PointerInput::ButtonDown(MouseButton::Left));
        router.route(Some(&icon), &mut down);
        let mut up = InputEvent::new(PointerInput::ButtonUp(MouseButton::Left));
        router.route(Some(&icon), &mut up);

        assert!(down.handled && up.handled);
        assert_eq!(vec![MonitorIdentifier::Numeric(0)], *shell.tray_host_claims.borrow());
        insta::assert_debug_snapshot!(shell.messages_for(IconId::from_u128(7)), @r###"
        [
            MouseDown {
                button: Left,
                cursor: Point {
                    x: 640,
                    y: 1050,
                },
                double_click_time_ms: 500,
            },
            MouseUp {
                button: Left,
                cursor: Point {
                    x: 640,
                    y: 1050,
                },
                double_click_time_ms: 500,
            },
        ]
        "###);
    }

    #[test]
    fn test_enter_updates_placement_with_display_scale() {
        let shell = FakeShell::new();
        shell.scale.set(1.5);
        let icon = TrayIcon::new(IconId::from_u128(7)).into_handle();

        let surface = SurfaceGeometry { origin: Point::new(1200, 1040), size: LogicalSize::new(16.0, 20.0) };
        router(&shell).route(Some(&icon), &mut InputEvent::new(PointerInput::Enter(surface)));

        assert_eq!(Rect { top: 1040, left: 1200, width: 24, height: 30 }, icon.borrow().placement);
        assert_eq!(
            vec![IconMessage::MouseEnter { cursor: Point::new(640, 1050) }],
            shell.messages_for(IconId::from_u128(7))
        );
    }

    #[test]
    fn test_leave_and_move_keep_placement() {
        let shell = FakeShell::new();
        let icon = TrayIcon::new(IconId::from_u128(7)).into_handle();
        let placement = Rect { top: 1, left: 2, width: 3, height: 4 };
        icon.borrow_mut().placement = placement;

        let router = router(&shell);
        router.route(Some(&icon), &mut InputEvent::new(PointerInput::Move));
        router.route(Some(&icon), &mut InputEvent::new(PointerInput::Leave));

        assert_eq!(placement, icon.borrow().placement);
        assert_eq!(
            vec![
                IconMessage::MouseMove { cursor: Point::new(640, 1050) },
                IconMessage::MouseLeave { cursor: Point::new(640, 1050) },
            ],
            shell.messages_for(IconId::from_u128(7))
        );
        assert!(shell.tray_host_claims.borrow().is_empty());
    }

    #[test]
    fn test_wheel_on_volume_icon_changes_volume() {
        let shell = FakeShell::new();
        let icon = TrayIcon::new(IconId::VOLUME).into_handle();
        let router = router(&shell);

        let mut up = InputEvent::new(PointerInput::Wheel { delta: 120 });
        router.route(Some(&icon), &mut up);
        router.route(Some(&icon), &mut InputEvent::new(PointerInput::Wheel { delta: -120 }));

        assert!(up.handled);
        assert_eq!(vec![VolumeDirection::Up, VolumeDirection::Down], *shell.volume_changes.borrow());
        assert!(shell.messages.borrow().is_empty());
    }

    #[test]
    fn test_wheel_on_other_icon_does_nothing() {
        let shell = FakeShell::new();
        let icon = TrayIcon::new(IconId::from_u128(7)).into_handle();

        let mut event = InputEvent::new(PointerInput::Wheel { delta: 120 });
        router(&shell).route(Some(&icon), &mut event);

        assert!(event.handled);
        assert!(shell.volume_changes.borrow().is_empty());
        assert!(shell.messages.borrow().is_empty());
    }

    #[test]
    fn test_volume_gesture_dropped_without_tray_window() {
        let shell = FakeShell::new();
        shell.tray_window.set(None);
        let icon = TrayIcon::new(IconId::VOLUME).into_handle();

        let mut event = InputEvent::new(PointerInput::Wheel { delta: 120 });
        router(&shell).route(Some(&icon), &mut event);

        assert!(event.handled);
        assert!(shell.volume_changes.borrow().is_empty());
    }

    #[test]
    fn test_missing_icon_only_marks_handled() {
        let shell = FakeShell::new();
        let router = router(&shell);
        let surface = SurfaceGeometry { origin: Point::new(10, 20), size: LogicalSize::new(16.0, 16.0) };
        for input in [
            PointerInput::ButtonDown(MouseButton::Right),
            PointerInput::ButtonUp(MouseButton::Right),
            PointerInput::Enter(surface),
            PointerInput::Leave,
            PointerInput::Move,
            PointerInput::Wheel { delta: 1 },
        ] {
            let mut event = InputEvent::new(input);
            router.route(None, &mut event);
            assert!(event.handled);
        }
        assert!(shell.messages.borrow().is_empty());
        assert!(shell.tray_host_claims.borrow().is_empty());
        assert!(shell.volume_changes.borrow().is_empty());
    }
}
