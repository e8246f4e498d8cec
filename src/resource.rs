//! ResourceArc Wrappers
//!
//! Persistent state for pull sessions driven from Elixir.

use crate::strategy::Session;
use rustler::ResourceArc;
use std::sync::Mutex;

/// Wrapper for Session that can be stored in a ResourceArc
pub struct SessionResource {
    pub inner: Mutex<Session>,
}

impl SessionResource {
    pub fn new(buffer: Vec<u8>) -> Self {
        SessionResource {
            inner: Mutex::new(Session::new(buffer)),
        }
    }

    /// Run `f` with exclusive access to the session.
    ///
    /// # Errors
    ///
    /// Returns `"mutex_poisoned"` if the session mutex is poisoned.
    pub fn with_session<F, R>(&self, f: F) -> Result<R, &'static str>
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut guard = self.inner.lock().map_err(|_| "mutex_poisoned")?;
        Ok(f(&mut guard))
    }
}

#[rustler::resource_impl]
impl rustler::Resource for SessionResource {}

/// Type alias for the ResourceArc
pub type SessionRef = ResourceArc<SessionResource>;
