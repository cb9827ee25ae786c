use std::rc::Rc;

use crate::*;

/// Decides which balloons of an icon one host shows.
///
/// Only the primary host ever shows balloons. Missed balloons are looked at when attaching,
/// live ones when they are raised. Expiry is only ever checked at those two points; expired
/// balloons are skipped but stay queued.
#[derive(Clone)]
pub struct BalloonScheduler {
    host: HostContext,
    renderer: Rc<dyn BalloonRenderer>,
    clock: Rc<dyn Clock>,
}

impl BalloonScheduler {
    pub fn new(host: HostContext, renderer: Rc<dyn BalloonRenderer>, clock: Rc<dyn Clock>) -> Self {
        Self { host, renderer, clock }
    }

    /// Start listening for live balloons, then show the earliest unexpired missed one.
    pub fn attach(&self, icon: &TrayIconHandle) -> SubscriptionId {
        let subscription = {
            let this = self.clone();
            let weak = Rc::downgrade(icon);
            let handler = move |event: &mut BalloonShownEvent| this.on_balloon_shown(&weak, event);
            icon.borrow_mut().subscribe_balloons(Rc::new(handler))
        };
        self.show_first_missed(icon);
        subscription
    }

    /// Stop listening. Queued balloons stay where they are.
    pub fn detach(&self, icon: &WeakTrayIcon, subscription: SubscriptionId) {
        if let Some(icon) = icon.upgrade() {
            if !icon.borrow_mut().unsubscribe_balloons(subscription) {
                log::warn!("Tried to remove nonexistent {} on monitor {}", subscription, self.host.monitor);
            }
        }
    }

    /// Show and dequeue the earliest missed balloon that hasn't expired. Returns whether one was shown.
    pub fn show_first_missed(&self, icon: &TrayIconHandle) -> bool {
        let now = self.clock.now();
        let (id, balloon) = {
            let mut icon = icon.borrow_mut();
            let Some(index) = icon.first_unexpired_missed(now) else {
                return false;
            };
            // secondary monitors leave the queue to the primary one
            if !self.host.is_primary || !icon.behavior.allows_balloons() {
                return false;
            }
            (icon.id, icon.missed_notifications.remove(index))
        };
        log::debug!("Showing missed balloon {:?} for {}", balloon.content.title, id);
        self.renderer.show(&id, &balloon);
        true
    }

    fn on_balloon_shown(&self, icon: &WeakTrayIcon, event: &mut BalloonShownEvent) {
        if !self.host.is_primary || event.handled {
            return;
        }
        let Some(icon) = icon.upgrade() else {
            return;
        };
        let (id, behavior) = {
            let icon = icon.borrow();
            (icon.id, icon.behavior)
        };
        if !behavior.allows_balloons() {
            return;
        }
        if !event.balloon.is_unexpired(self.clock.now()) {
            log::debug!("Not showing expired balloon {:?} for {}", event.balloon.content.title, id);
            return;
        }
        self.renderer.show(&id, &event.balloon);
        event.handled = true;
    }
}
