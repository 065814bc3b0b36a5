use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::models::{ArAnimation, OverlayElement};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = false;

use crate::log_info;

struct TimerEntry {
    token: CancellationToken,
    epoch: u64,
}

#[derive(Default)]
struct StoreInner {
    elements: Vec<OverlayElement>,
    animations: Vec<ArAnimation>,
    timers: HashMap<String, TimerEntry>,
    next_epoch: u64,
}

/// Holds the active overlay elements and animation descriptors for one
/// session. Cheap to clone; clones share state. TTL expiries run as child
/// tasks of the store lifetime token, so expiries scheduled before teardown
/// are no-ops afterwards.
#[derive(Clone)]
pub struct OverlayStore {
    inner: Arc<Mutex<StoreInner>>,
    lifetime: CancellationToken,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner::default())),
            lifetime: CancellationToken::new(),
        }
    }

    /// Insert an element. An existing element with the same id is replaced in
    /// place (same snapshot position) and its pending expiry is rescheduled,
    /// not stacked.
    pub async fn insert(&self, element: OverlayElement) {
        let id = element.id.clone();
        // The deadline is fixed at insertion; the expiry task may start
        // polling later without pushing it back.
        let deadline = element
            .ttl_ms
            .map(|ttl_ms| Instant::now() + Duration::from_millis(ttl_ms));

        let epoch = {
            let mut inner = self.inner.lock().await;

            if let Some(entry) = inner.timers.remove(&id) {
                entry.token.cancel();
            }

            match inner.elements.iter_mut().find(|existing| existing.id == id) {
                Some(slot) => *slot = element,
                None => inner.elements.push(element),
            }

            inner.next_epoch += 1;
            let epoch = inner.next_epoch;

            if deadline.is_some() {
                let token = self.lifetime.child_token();
                inner.timers.insert(
                    id.clone(),
                    TimerEntry {
                        token: token.clone(),
                        epoch,
                    },
                );
            }
            epoch
        };

        if let Some(deadline) = deadline {
            self.spawn_expiry(id, deadline, epoch).await;
        }
    }

    fn expiry_token(inner: &StoreInner, id: &str, epoch: u64) -> Option<CancellationToken> {
        inner
            .timers
            .get(id)
            .filter(|entry| entry.epoch == epoch)
            .map(|entry| entry.token.clone())
    }

    async fn spawn_expiry(&self, id: String, deadline: Instant, epoch: u64) {
        let token = {
            let inner = self.inner.lock().await;
            match Self::expiry_token(&inner, &id, epoch) {
                Some(token) => token,
                // Replaced or removed between insert and spawn.
                None => return,
            }
        };

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => {
                    let mut guard = inner.lock().await;
                    // A replacement insert bumps the epoch; only the timer
                    // that still owns the id may remove it.
                    let still_owner = guard
                        .timers
                        .get(&id)
                        .map(|entry| entry.epoch == epoch)
                        .unwrap_or(false);
                    if still_owner {
                        guard.timers.remove(&id);
                        guard.elements.retain(|element| element.id != id);
                        log_info!("overlay {id} expired");
                    }
                }
                _ = token.cancelled() => {}
            }
        });
    }

    /// Idempotent removal; cancels any pending expiry for the id.
    pub async fn remove(&self, id: &str) {
        let mut inner = self.inner.lock().await;
        if let Some(entry) = inner.timers.remove(id) {
            entry.token.cancel();
        }
        inner.elements.retain(|element| element.id != id);
    }

    /// Remove everything and cancel all pending expiries. Called once, at
    /// session teardown; timers that already fired see an empty store.
    pub async fn clear(&self) {
        self.lifetime.cancel();
        let mut inner = self.inner.lock().await;
        for entry in inner.timers.values() {
            entry.token.cancel();
        }
        inner.timers.clear();
        inner.elements.clear();
        inner.animations.clear();
    }

    /// Elements in insertion order, for the external renderer.
    pub async fn snapshot(&self) -> Vec<OverlayElement> {
        self.inner.lock().await.elements.clone()
    }

    /// Register an animation descriptor; replaces any with the same id.
    pub async fn insert_animation(&self, animation: ArAnimation) {
        let mut inner = self.inner.lock().await;
        match inner
            .animations
            .iter_mut()
            .find(|existing| existing.id == animation.id)
        {
            Some(slot) => *slot = animation,
            None => inner.animations.push(animation),
        }
    }

    pub async fn remove_animation(&self, id: &str) {
        let mut inner = self.inner.lock().await;
        inner.animations.retain(|animation| animation.id != id);
    }

    pub async fn animations(&self) -> Vec<ArAnimation> {
        self.inner.lock().await.animations.clone()
    }
}

impl Default for OverlayStore {
    fn default() -> Self {
        Self::new()
    }
}
