use tray_shared_util::Rect;

use crate::*;

/// All tray icons currently registered with the native tray, in registration order.
#[derive(Debug, Default)]
pub struct TrayRegistry {
    icons: Vec<TrayIconHandle>,
}

impl TrayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an icon. An icon with the same id gets replaced.
    pub fn add_icon(&mut self, icon: TrayIcon) -> TrayIconHandle {
        let id = icon.id;
        let handle = icon.into_handle();
        match self.position(&id) {
            Some(index) => {
                log::warn!("Got duplicate icon {}, replacing it", id);
                self.icons[index] = handle.clone();
            }
            None => self.icons.push(handle.clone()),
        }
        handle
    }

    pub fn remove_icon(&mut self, id: &IconId) -> Option<TrayIconHandle> {
        let index = self.position(id)?;
        Some(self.icons.remove(index))
    }

    /// Register an icon and add it to every host.
    pub fn register(&mut self, icon: TrayIcon, hosts: &mut [&mut dyn Host]) -> TrayIconHandle {
        let handle = self.add_icon(icon);
        for host in hosts.iter_mut() {
            host.add_item(&handle);
        }
        handle
    }

    /// Remove an icon from every host, then unregister it.
    pub fn unregister(&mut self, id: &IconId, hosts: &mut [&mut dyn Host]) -> Option<TrayIconHandle> {
        for host in hosts.iter_mut() {
            host.remove_item(id);
        }
        self.remove_icon(id)
    }

    pub fn get(&self, id: &IconId) -> Option<TrayIconHandle> {
        self.position(id).map(|index| self.icons[index].clone())
    }

    pub fn icons(&self) -> impl Iterator<Item = &TrayIconHandle> {
        self.icons.iter()
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Where the icon was last seen on screen, for the native tray's icon position queries.
    pub fn icon_rect(&self, id: &IconId) -> Option<Rect> {
        self.get(id).map(|icon| icon.borrow().placement)
    }

    /// Hand a new balloon to every host showing the icon. If none of them shows it, it gets queued
    /// as missed. Returns whether it was shown.
    pub fn raise_balloon(&self, id: &IconId, balloon: NotificationBalloon) -> bool {
        let Some(icon) = self.get(id) else {
            log::warn!("Got balloon for unknown icon {}", id);
            return false;
        };
        let mut event = BalloonShownEvent::new(balloon);
        dispatch_balloon_shown(&icon, &mut event);
        if !event.handled {
            log::debug!("Nobody showed balloon {:?} for {}, queueing it", event.balloon.content.title, id);
            icon.borrow_mut().missed_notifications.push(event.balloon);
        }
        event.handled
    }

    fn position(&self, id: &IconId) -> Option<usize> {
        self.icons.iter().position(|icon| icon.borrow().id == *id)
    }
}
