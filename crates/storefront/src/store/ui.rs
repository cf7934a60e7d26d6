//! Ephemeral view state: toast queue and drawer flags.
//!
//! Nothing here is persisted. Toast expiry is computed against the injected
//! [`Clock`]; the host event loop calls [`UiStore::expire_due`] (ideally at
//! [`UiStore::next_expiry`]) to drop toasts whose time-to-live has elapsed.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::instrument;
use uuid::Uuid;

use crate::clock::Clock;

/// Default toast lifetime.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(4);
/// Default number of toasts kept on screen.
pub const DEFAULT_MAX_TOASTS: usize = 5;

/// Toast severity, mapped to colour and icon by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub severity: Severity,
    pub title: String,
    pub message: Option<String>,
    pub ttl: Duration,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    /// When the toast auto-dismisses.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        TimeDelta::from_std(self.ttl)
            .ok()
            .and_then(|ttl| self.created_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Whether the toast has outlived its TTL at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

/// A toast to enqueue, with an optional TTL override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastRequest {
    pub severity: Severity,
    pub title: String,
    pub message: Option<String>,
    pub ttl: Option<Duration>,
}

impl ToastRequest {
    /// A request using the default TTL.
    #[must_use]
    pub fn new(severity: Severity, title: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: None,
            ttl: None,
        }
    }

    /// Attach a body message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Override the TTL.
    #[must_use]
    pub const fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// Which drawer or overlay is open. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Drawers {
    pub cart: bool,
    pub wishlist: bool,
    pub mobile_menu: bool,
}

/// Toast queue and drawer flags.
pub struct UiStore {
    toasts: VecDeque<Toast>,
    drawers: Drawers,
    default_ttl: Duration,
    max_toasts: usize,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for UiStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiStore")
            .field("toasts", &self.toasts)
            .field("drawers", &self.drawers)
            .field("default_ttl", &self.default_ttl)
            .field("max_toasts", &self.max_toasts)
            .finish_non_exhaustive()
    }
}

impl UiStore {
    /// Create an empty UI store. `max_toasts` is raised to at least one.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, default_ttl: Duration, max_toasts: usize) -> Self {
        Self {
            toasts: VecDeque::new(),
            drawers: Drawers::default(),
            default_ttl,
            max_toasts: max_toasts.max(1),
            clock,
        }
    }

    /// Enqueue a toast, dropping the oldest beyond the cap. Returns its id.
    #[instrument(skip(self), fields(severity = ?request.severity))]
    pub fn push(&mut self, request: ToastRequest) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            severity: request.severity,
            title: request.title,
            message: request.message,
            ttl: request.ttl.unwrap_or(self.default_ttl),
            created_at: self.clock.now(),
        };
        let id = toast.id;
        self.toasts.push_back(toast);
        while self.toasts.len() > self.max_toasts {
            if let Some(dropped) = self.toasts.pop_front() {
                tracing::debug!(id = %dropped.id, "Dropped oldest toast");
            }
        }
        id
    }

    /// Convenience constructors using the default TTL.
    pub fn toast(&mut self) -> Toaster<'_> {
        Toaster { ui: self }
    }

    /// Dismiss a toast explicitly. Returns whether it was present.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    /// Remove toasts whose TTL has elapsed. Returns how many were removed.
    pub fn expire_due(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.toasts.len();
        self.toasts.retain(|toast| !toast.is_expired(now));
        before - self.toasts.len()
    }

    /// The earliest pending expiry, for scheduling the next [`UiStore::expire_due`].
    #[must_use]
    pub fn next_expiry(&self) -> Option<DateTime<Utc>> {
        self.toasts.iter().map(Toast::expires_at).min()
    }

    /// Toasts still within their TTL, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        let now = self.clock.now();
        self.toasts.iter().filter(move |toast| !toast.is_expired(now))
    }

    /// Current drawer flags.
    #[must_use]
    pub const fn drawers(&self) -> Drawers {
        self.drawers
    }

    /// Open or close the cart drawer. Opening closes the other overlays.
    pub fn set_cart_drawer_open(&mut self, open: bool) {
        self.drawers = if open {
            Drawers {
                cart: true,
                ..Drawers::default()
            }
        } else {
            Drawers {
                cart: false,
                ..self.drawers
            }
        };
    }

    /// Open or close the wishlist drawer. Opening closes the other overlays.
    pub fn set_wishlist_drawer_open(&mut self, open: bool) {
        self.drawers = if open {
            Drawers {
                wishlist: true,
                ..Drawers::default()
            }
        } else {
            Drawers {
                wishlist: false,
                ..self.drawers
            }
        };
    }

    /// Open or close the mobile menu. Opening closes the other overlays.
    pub fn set_mobile_menu_open(&mut self, open: bool) {
        self.drawers = if open {
            Drawers {
                mobile_menu: true,
                ..Drawers::default()
            }
        } else {
            Drawers {
                mobile_menu: false,
                ..self.drawers
            }
        };
    }

    /// Close every overlay.
    pub fn close_all(&mut self) {
        self.drawers = Drawers::default();
    }
}

/// `ui.toast().success(...)` style helpers.
pub struct Toaster<'a> {
    ui: &'a mut UiStore,
}

impl Toaster<'_> {
    /// Enqueue a success toast.
    pub fn success(self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.emit(Severity::Success, title, message)
    }

    /// Enqueue an error toast.
    pub fn error(self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.emit(Severity::Error, title, message)
    }

    /// Enqueue an info toast.
    pub fn info(self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.emit(Severity::Info, title, message)
    }

    /// Enqueue a warning toast.
    pub fn warning(self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.emit(Severity::Warning, title, message)
    }

    fn emit(
        self,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Uuid {
        let message = message.into();
        let mut request = ToastRequest::new(severity, title);
        if !message.is_empty() {
            request = request.message(message);
        }
        self.ui.push(request)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn ui(max: usize) -> (UiStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        (UiStore::new(clock.clone(), DEFAULT_TOAST_TTL, max), clock)
    }

    #[test]
    fn test_toast_helpers_set_severity() {
        let (mut ui, _) = ui(5);
        ui.toast().success("Added to bag", "Court Sneaker");
        ui.toast().error("Select a size", "");
        let severities: Vec<_> = ui.visible().map(|t| t.severity).collect();
        assert_eq!(severities, [Severity::Success, Severity::Error]);
        assert!(ui.visible().nth(1).unwrap().message.is_none());
    }

    #[test]
    fn test_queue_is_bounded() {
        let (mut ui, _) = ui(3);
        let ids: Vec<_> = (0..5).map(|i| ui.toast().info(format!("t{i}"), "")).collect();
        let kept: Vec<_> = ui.visible().map(|t| t.id).collect();
        assert_eq!(kept, ids[2..]);
    }

    #[test]
    fn test_auto_dismiss_after_ttl() {
        let (mut ui, clock) = ui(5);
        ui.toast().info("default ttl", "");
        ui.push(ToastRequest::new(Severity::Warning, "long").ttl(Duration::from_secs(10)));

        clock.advance(TimeDelta::seconds(3));
        assert_eq!(ui.visible().count(), 2);

        clock.advance(TimeDelta::seconds(1));
        assert_eq!(ui.visible().count(), 1);
        assert_eq!(ui.expire_due(), 1);

        clock.advance(TimeDelta::seconds(6));
        assert_eq!(ui.expire_due(), 1);
        assert!(ui.next_expiry().is_none());
    }

    #[test]
    fn test_next_expiry_is_earliest() {
        let (mut ui, clock) = ui(5);
        ui.push(ToastRequest::new(Severity::Info, "a").ttl(Duration::from_secs(9)));
        ui.push(ToastRequest::new(Severity::Info, "b").ttl(Duration::from_secs(2)));
        assert_eq!(ui.next_expiry(), Some(clock.now() + TimeDelta::seconds(2)));
    }

    #[test]
    fn test_dismiss() {
        let (mut ui, _) = ui(5);
        let id = ui.toast().warning("Low stock", "Only 2 left");
        assert!(ui.dismiss(id));
        assert!(!ui.dismiss(id));
        assert_eq!(ui.visible().count(), 0);
    }

    #[test]
    fn test_drawers_are_exclusive() {
        let (mut ui, _) = ui(5);
        ui.set_mobile_menu_open(true);
        ui.set_cart_drawer_open(true);
        assert_eq!(
            ui.drawers(),
            Drawers {
                cart: true,
                wishlist: false,
                mobile_menu: false
            }
        );
        ui.set_cart_drawer_open(false);
        assert_eq!(ui.drawers(), Drawers::default());
    }
}
