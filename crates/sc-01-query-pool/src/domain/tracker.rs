//! Request/response pair tracked while a request awaits block inclusion.

use parking_lot::RwLock;
use shared_types::{Request, Response};
use std::sync::Arc;

/// Timestamp in milliseconds since UNIX epoch.
pub type Timestamp = u64;

/// A request paired with its (eventual) response.
///
/// The request is fixed at construction. The response starts absent and is
/// set by the execution engine through [`QueryTracker::update_resp`]; later
/// calls overwrite it (last write wins) so a retried execution can replace an
/// earlier result.
///
/// Each tracker carries its own lock. Workers attaching responses to
/// different trackers never contend, and a producer polling [`ready`] does not
/// serialize against writers of unrelated trackers.
///
/// [`ready`]: QueryTracker::ready
#[derive(Debug)]
pub struct QueryTracker {
    req: Arc<Request>,
    resp: RwLock<Option<Response>>,
    enqueued_at: Timestamp,
}

impl QueryTracker {
    /// Creates a tracker with no response.
    pub fn new(req: impl Into<Arc<Request>>) -> Self {
        Self::with_timestamp(req, 0)
    }

    /// Creates a tracker with no response, stamped with its acceptance time.
    pub fn with_timestamp(req: impl Into<Arc<Request>>, enqueued_at: Timestamp) -> Self {
        Self {
            req: req.into(),
            resp: RwLock::new(None),
            enqueued_at,
        }
    }

    /// The tracked request.
    pub fn request(&self) -> &Arc<Request> {
        &self.req
    }

    /// When the tracker was accepted (ms).
    pub fn enqueued_at(&self) -> Timestamp {
        self.enqueued_at
    }

    /// Sets the response under the write lock.
    pub fn update_resp(&self, resp: Response) {
        *self.resp.write() = Some(resp);
    }

    /// Sets the response only if none is present. Returns true if it was set.
    pub fn update_resp_if_absent(&self, resp: Response) -> bool {
        let mut slot = self.resp.write();
        if slot.is_some() {
            return false;
        }
        *slot = Some(resp);
        true
    }

    /// Reports whether a response is present. Point-in-time snapshot, never waits.
    pub fn ready(&self) -> bool {
        self.resp.read().is_some()
    }

    /// Snapshot of the current response.
    pub fn response(&self) -> Option<Response> {
        self.resp.read().clone()
    }
}
