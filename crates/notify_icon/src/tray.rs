use tokio::sync::watch;

use crate::*;

/// Something that shows tray icons, e.g. the notification area of one taskbar.
pub trait Host {
    fn add_item(&mut self, icon: &TrayIconHandle);
    fn remove_item(&mut self, id: &IconId);
}

/// Creates the visual for an icon on a host.
pub type VisualFactory = Box<dyn Fn(&IconId) -> IconVisual>;

/// The notification area of the taskbar on one monitor.
pub struct TaskbarTray {
    host: HostContext,
    shell: Shell,
    settings: watch::Receiver<TrayConfig>,
    make_visual: VisualFactory,
    items: Vec<(IconId, HostBinding)>,
}

impl TaskbarTray {
    pub fn new(host: HostContext, shell: Shell, settings: &SettingsWatch, make_visual: VisualFactory) -> Self {
        Self { host, shell, settings: settings.subscribe(), make_visual, items: Vec::new() }
    }

    pub fn host(&self) -> &HostContext {
        &self.host
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn binding(&self, id: &IconId) -> Option<&HostBinding> {
        self.items.iter().find(|(item, _)| item == id).map(|(_, binding)| binding)
    }

    /// Route pointer input on the icon with the given id. Input for unknown icons is swallowed.
    pub fn handle_input(&self, id: &IconId, event: &mut InputEvent) {
        match self.binding(id) {
            Some(binding) => binding.handle_input(event),
            None => event.handled = true,
        }
    }

    /// Let every icon react to changed settings.
    pub fn refresh_settings(&mut self) {
        for (_, binding) in self.items.iter_mut() {
            binding.refresh_settings();
        }
    }
}

impl Host for TaskbarTray {
    fn add_item(&mut self, icon: &TrayIconHandle) {
        let id = icon.borrow().id;
        let visual = (self.make_visual)(&id);
        let mut binding = HostBinding::new(self.host.clone(), self.shell.clone(), visual, self.settings.clone());
        binding.attach(icon);

        match self.items.iter().position(|(item, _)| *item == id) {
            // the old binding detaches when it gets dropped
            Some(index) => self.items[index].1 = binding,
            None => self.items.push((id, binding)),
        }
    }

    fn remove_item(&mut self, id: &IconId) {
        match self.items.iter().position(|(item, _)| item == id) {
            Some(index) => {
                let (_, mut binding) = self.items.remove(index);
                binding.detach();
            }
            None => log::warn!("Tried to remove nonexistent item {} from tray on monitor {}", id, self.host.monitor),
        }
    }
}
