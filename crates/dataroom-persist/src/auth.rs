use tracing::info;

use crate::backend::SlotBackend;
use crate::error::PersistResult;

/// Slot holding the demo login flag.
pub const AUTH_KEY: &str = "demo-auth";

const AUTHENTICATED: &str = "true";

/// The demo authentication boundary: a single boolean slot.
///
/// There are no credentials. Any other value than `"true"` (including a
/// missing slot) reads as logged out.
#[derive(Debug)]
pub struct AuthFlag<B> {
    backend: B,
}

impl<B: SlotBackend> AuthFlag<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn is_authenticated(&self) -> PersistResult<bool> {
        Ok(self.backend.get(AUTH_KEY)?.as_deref() == Some(AUTHENTICATED))
    }

    pub fn login(&self) -> PersistResult<()> {
        self.backend.set(AUTH_KEY, AUTHENTICATED)?;
        info!("logged in");
        Ok(())
    }

    pub fn logout(&self) -> PersistResult<()> {
        self.backend.remove(AUTH_KEY)?;
        info!("logged out");
        Ok(())
    }
}
