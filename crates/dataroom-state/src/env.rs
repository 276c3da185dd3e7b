//! Injected sources of time and identity.
//!
//! The reducer is deterministic apart from timestamps and freshly minted
//! ids. Both come from an [`Environment`] so tests can pin them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{TimeDelta, Utc};
use dataroom_types::{base36, IdKind, Timestamp};

/// Length of the random segment in generated entity ids.
const ID_RANDOM_LEN: usize = 6;

/// Clock and id source for the reducer.
pub trait Environment: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> Timestamp;

    /// A fresh id string for an entity of `kind`. Must never repeat.
    fn mint_id(&self, kind: IdKind) -> String;
}

/// Production environment: system clock and random ids of the form
/// `{prefix}_{6 random base36}_{epoch-millis base36}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn mint_id(&self, kind: IdKind) -> String {
        let epoch_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        kind.mint(&base36::random(ID_RANDOM_LEN), epoch_ms)
    }
}

/// Deterministic environment for tests: a settable clock and sequential ids
/// (`dr_1`, `folder-root_2`, `file_3`, ...).
#[derive(Debug)]
pub struct FixedEnvironment {
    now: Mutex<Timestamp>,
    counter: AtomicU64,
}

impl FixedEnvironment {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
            counter: AtomicU64::new(0),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: TimeDelta) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }

    /// Jump the clock to an absolute instant.
    pub fn set_now(&self, at: Timestamp) {
        if let Ok(mut now) = self.now.lock() {
            *now = at;
        }
    }
}

impl Environment for FixedEnvironment {
    fn now(&self) -> Timestamp {
        self.now.lock().map(|now| *now).unwrap_or_default()
    }

    fn mint_id(&self, kind: IdKind) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}_{n}", kind.prefix())
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn mint_id(&self, kind: IdKind) -> String {
        (**self).mint_id(kind)
    }
}
