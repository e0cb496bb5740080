//! Focus gating for keyboard input.
//!
//! A calculator only reacts to keys while its container "has focus". The
//! host UI reports focus, blur, click, and mount events; the gate answers
//! [`FocusGate::accepts_keys`].
//!
//! A blur does not deactivate the gate immediately. Clicking a button inside
//! the container blurs the previously focused element before the button
//! takes focus, so the gate waits for a grace delay and only deactivates if
//! focus is still outside the container when it expires.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Default delay between a blur and the gate deactivating
pub const DEFAULT_BLUR_GRACE: Duration = Duration::from_millis(100);

/// Where key events are accepted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusScope {
    /// Every key event counts (no container to check)
    Global,
    /// Only while the container holds focus or was recently activated
    #[default]
    Container,
}

#[derive(Debug, Clone)]
pub struct FocusGate {
    scope: FocusScope,
    /// Container exists in the UI
    mounted: bool,
    /// Focused element is the container or one of its children
    focus_within: bool,
    /// Set by focus or click, cleared when a pending blur expires
    active: bool,
    blur_deadline: Option<Instant>,
    grace: Duration,
}

impl FocusGate {
    /// Gate for a container that is mounted but not yet focused
    pub fn new(scope: FocusScope) -> Self {
        FocusGate {
            scope,
            mounted: true,
            focus_within: false,
            active: false,
            blur_deadline: None,
            grace: DEFAULT_BLUR_GRACE,
        }
    }

    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn scope(&self) -> FocusScope {
        self.scope
    }

    pub fn grace(&self) -> Duration {
        self.grace
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Container reference became available
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    /// Container reference was unset; all input is ignored until remounted
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.focus_within = false;
        self.active = false;
        self.blur_deadline = None;
    }

    /// Focus moved to the container or an element inside it
    pub fn on_focus(&mut self) {
        self.focus_within = true;
        self.active = true;
        self.blur_deadline = None;
        tracing::trace!("focus gate: focus entered container");
    }

    /// Focus left an element inside the container
    pub fn on_blur(&mut self, now: Instant) {
        self.focus_within = false;
        self.blur_deadline = Some(now + self.grace);
        tracing::trace!(grace_ms = self.grace.as_millis() as u64, "focus gate: blur scheduled");
    }

    /// Pointer click; `inside` is whether the target lies within the container.
    ///
    /// A click inside activates the gate and focuses the container.
    pub fn on_click(&mut self, inside: bool) {
        if inside && self.mounted {
            self.on_focus();
        }
    }

    /// Expire a pending blur whose grace delay has elapsed
    pub fn poll(&mut self, now: Instant) {
        if let Some(deadline) = self.blur_deadline {
            if now >= deadline {
                self.blur_deadline = None;
                if !self.focus_within {
                    self.active = false;
                    tracing::debug!("focus gate: deactivated after blur");
                }
            }
        }
    }

    /// Whether a pending blur is waiting on its grace delay
    pub fn has_pending_blur(&self) -> bool {
        self.blur_deadline.is_some()
    }

    /// Whether key events should be processed at `now`
    pub fn accepts_keys(&mut self, now: Instant) -> bool {
        self.poll(now);
        match self.scope {
            FocusScope::Global => true,
            FocusScope::Container => self.mounted && (self.focus_within || self.active),
        }
    }
}

impl Default for FocusGate {
    fn default() -> Self {
        FocusGate::new(FocusScope::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_starts_inactive() {
        let mut gate = FocusGate::new(FocusScope::Container);
        assert!(!gate.accepts_keys(Instant::now()));
    }

    #[test]
    fn test_global_scope_always_accepts() {
        let mut gate = FocusGate::new(FocusScope::Global);
        assert!(gate.accepts_keys(Instant::now()));
    }

    #[test]
    fn test_focus_activates() {
        let mut gate = FocusGate::new(FocusScope::Container);
        gate.on_focus();
        assert!(gate.accepts_keys(Instant::now()));
    }

    #[test]
    fn test_click_inside_activates_click_outside_does_not() {
        let mut gate = FocusGate::new(FocusScope::Container);
        gate.on_click(false);
        assert!(!gate.accepts_keys(Instant::now()));
        gate.on_click(true);
        assert!(gate.accepts_keys(Instant::now()));
    }

    #[test]
    fn test_blur_keeps_gate_open_during_grace() {
        let start = Instant::now();
        let mut gate = FocusGate::new(FocusScope::Container);
        gate.on_focus();
        gate.on_blur(start);
        assert!(gate.accepts_keys(start + Duration::from_millis(50)));
        assert!(!gate.accepts_keys(start + Duration::from_millis(100)));
        assert!(!gate.has_pending_blur());
    }

    #[test]
    fn test_refocus_within_grace_cancels_blur() {
        let start = Instant::now();
        let mut gate = FocusGate::new(FocusScope::Container);
        gate.on_focus();
        gate.on_blur(start);
        // Focus moved to a button inside the container
        gate.on_focus();
        assert!(gate.accepts_keys(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_custom_grace() {
        let start = Instant::now();
        let mut gate = FocusGate::new(FocusScope::Container).with_grace(Duration::from_millis(500));
        gate.on_focus();
        gate.on_blur(start);
        assert!(gate.accepts_keys(start + Duration::from_millis(300)));
        assert!(!gate.accepts_keys(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_unmounted_ignores_everything() {
        let mut gate = FocusGate::new(FocusScope::Container);
        gate.on_focus();
        gate.unmount();
        assert!(!gate.accepts_keys(Instant::now()));
        gate.on_click(true);
        assert!(!gate.accepts_keys(Instant::now()));
        gate.mount();
        gate.on_click(true);
        assert!(gate.accepts_keys(Instant::now()));
    }
}
