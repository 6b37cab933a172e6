use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serenity::http::Http;

use crate::config::Config;
use crate::invites::{InviteRegistry, UsageCache};

/// Long-lived state shared between the Discord event handler and the HTTP
/// facade: the two invite maps plus a late-bound HTTP handle, set once the
/// gateway connection is ready so web handlers can post messages.
pub struct AppState {
    pub config: Config,
    pub registry: InviteRegistry,
    pub invite_uses: UsageCache,
    http: OnceCell<Arc<Http>>,
    button_posted: AtomicBool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            registry: InviteRegistry::default(),
            invite_uses: UsageCache::default(),
            http: OnceCell::new(),
            button_posted: AtomicBool::new(false),
        }
    }

    /// True exactly once per process. `ready` re-fires on gateway
    /// reconnects; the staff prompt must not accumulate in the request
    /// channel. Re-posting stays available via `POST /post-invite-button`.
    pub fn should_post_button(&self) -> bool {
        !self.button_posted.swap(true, Ordering::SeqCst)
    }

    /// Idempotent; `ready` fires again on gateway reconnects.
    pub fn set_http(&self, http: Arc<Http>) {
        let _ = self.http.set(http);
    }

    /// `None` until the first `ready` event.
    pub fn http(&self) -> Option<Arc<Http>> {
        self.http.get().cloned()
    }
}
