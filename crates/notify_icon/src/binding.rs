use std::rc::Rc;

use tokio::sync::watch;

use crate::*;

enum BindingState {
    Detached,
    Attached { icon: WeakTrayIcon, subscription: SubscriptionId },
}

/// Wires the visual of one icon on one host to its [`TrayIcon`].
///
/// Hosting environments may report attach and detach more than once (e.g. when a visual gets
/// reused), so both are no-ops when already in the target state. Dropping the binding detaches it.
pub struct HostBinding {
    host: HostContext,
    shell: Shell,
    scheduler: BalloonScheduler,
    router: InputRouter,
    effect_target: Rc<dyn IconEffectTarget>,
    effects: EffectState,
    settings: watch::Receiver<TrayConfig>,
    state: BindingState,
}

impl HostBinding {
    pub fn new(host: HostContext, shell: Shell, visual: IconVisual, settings: watch::Receiver<TrayConfig>) -> Self {
        let scheduler = BalloonScheduler::new(host.clone(), visual.renderer, shell.clock.clone());
        let router = InputRouter::new(host.monitor.clone(), shell.clone());
        Self {
            host,
            shell,
            scheduler,
            router,
            effect_target: visual.effects,
            effects: EffectState::default(),
            settings,
            state: BindingState::Detached,
        }
    }

    pub fn host(&self) -> &HostContext {
        &self.host
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, BindingState::Attached { .. })
    }

    /// The attached icon, if there is one and it's still registered.
    pub fn attached_icon(&self) -> Option<TrayIconHandle> {
        match &self.state {
            BindingState::Attached { icon, .. } => icon.upgrade(),
            BindingState::Detached => None,
        }
    }

    /// Returns false if this was already attached.
    pub fn attach(&mut self, icon: &TrayIconHandle) -> bool {
        if self.is_attached() {
            return false;
        }
        self.settings.borrow_and_update();
        self.apply_effects(&icon.borrow());
        let subscription = self.scheduler.attach(icon);
        log::debug!("Attached {} on monitor {}", icon.borrow().id, self.host.monitor);
        self.state = BindingState::Attached { icon: Rc::downgrade(icon), subscription };
        true
    }

    /// Returns false if this was already detached.
    pub fn detach(&mut self) -> bool {
        match std::mem::replace(&mut self.state, BindingState::Detached) {
            BindingState::Attached { icon, subscription } => {
                self.scheduler.detach(&icon, subscription);
                log::debug!("Detached from monitor {}", self.host.monitor);
                true
            }
            BindingState::Detached => false,
        }
    }

    pub fn handle_input(&self, event: &mut InputEvent) {
        self.router.route(self.attached_icon().as_ref(), event);
    }

    pub fn should_render_inverted(&self) -> bool {
        self.effects.is_inverted()
    }

    /// Re-evaluate the icon effects if the settings changed since the last look.
    pub fn refresh_settings(&mut self) -> bool {
        if !self.settings.has_changed().unwrap_or(false) {
            return false;
        }
        self.settings.borrow_and_update();
        self.refresh_effects();
        true
    }

    /// Re-evaluate the icon effects, e.g. after the theme changed.
    pub fn refresh_effects(&mut self) {
        if let Some(icon) = self.attached_icon() {
            self.apply_effects(&icon.borrow());
        }
    }

    fn apply_effects(&mut self, icon: &TrayIcon) {
        let mode = self.settings.borrow().invert_icons_mode;
        let desired = should_invert(icon, theme_inverts_icons(&*self.shell.theme), mode);
        self.effects.apply(desired, &*self.effect_target);
    }
}

impl Drop for HostBinding {
    fn drop(&mut self) {
        self.detach();
    }
}
