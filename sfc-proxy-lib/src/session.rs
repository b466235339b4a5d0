use std::collections::HashMap;
use std::sync::Mutex;

use ahash::RandomState;

use crate::bundle::HeaderBundle;
use crate::flow::FlowKey;

/// The two session tables (`S_fwd`, `S_rev`) shared read/write across the
/// three pipeline workers.
///
/// Each map is guarded by its own coarse `Mutex`: a lookup observes either a
/// full prior insert or nothing (the mutex makes bundle insertion atomic),
/// and inserts for distinct keys in the two tables never contend with each
/// other. This is the "single coarse mutex" the design allows, applied per
/// table rather than as one lock across both so the (more frequent) forward
/// table isn't serialized behind reply-table traffic.
#[derive(Default)]
pub struct SessionTables {
    forward: Mutex<HashMap<FlowKey, HeaderBundle, RandomState>>,
    reply: Mutex<HashMap<FlowKey, HeaderBundle, RandomState>>,
}

impl SessionTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if `key` has ever been recorded as a forward session.
    pub fn contains_forward(&self, key: &FlowKey) -> bool {
        self.forward.lock().unwrap_or_else(|e| e.into_inner()).contains_key(key)
    }

    pub fn get_forward(&self, key: &FlowKey) -> Option<HeaderBundle> {
        self.forward
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    pub fn get_reply(&self, key: &FlowKey) -> Option<HeaderBundle> {
        self.reply
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    /// Unconditional overwrite on repeats, per the idempotent-insert rule.
    pub fn insert_forward(&self, key: FlowKey, bundle: HeaderBundle) {
        self.forward
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, bundle);
    }

    pub fn insert_reply(&self, key: FlowKey, bundle: HeaderBundle) {
        self.reply
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, bundle);
    }

    /// Number of flows currently recorded as forward sessions. Exposed for
    /// diagnostics and tests, not consulted by the pipelines themselves.
    pub fn forward_len(&self) -> usize {
        self.forward.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Number of flows currently recorded as reply sessions.
    pub fn reply_len(&self) -> usize {
        self.reply.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
