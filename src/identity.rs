use rustc_hash::FxHashMap;

use crate::component::Component;
use crate::math::{Rect, Vector2};
use crate::pointer::PointerButton;

/// Previous-frame state persisted for one element id. Overwritten every
/// frame the id recurs; stale records for ids that stop being declared are
/// harmless and stay until the caller clears the store.
#[derive(Debug, Clone, Default)]
pub struct IdentityRecord {
    pub rect: Rect,
    pub absolute_rect: Rect,
    pub components: Vec<Component>,
    pub children: Vec<u32>,
    pub parent: Option<u32>,
    /// Per-axis content overflow recorded by the solver.
    pub overflow: Vector2,
    pub hovered: bool,
    pub pressed: Option<PointerButton>,
    /// This id was the single topmost hovered node; gates press semantics
    /// for the next frame's queries.
    pub was_topmost: bool,
    /// The node was culled by its parent clip and took no part in hit
    /// registration.
    pub culled: bool,
}

/// Cross-frame identity map. Frame N's layout output becomes frame N+1's
/// lookup table: interaction queries are answered from here before the
/// current frame's layout exists.
#[derive(Debug, Default)]
pub struct IdentityStore {
    records: FxHashMap<u32, IdentityRecord>,
    /// Id flagged topmost at the end of the last finalized frame.
    topmost: Option<u32>,
    /// The single live press capture: `(id, button)`, first-claimed wins.
    captured: Option<(u32, PointerButton)>,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: u32) -> Option<&IdentityRecord> {
        self.records.get(&id)
    }

    pub fn insert(&mut self, id: u32, record: IdentityRecord) {
        self.records.insert(id, record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn topmost(&self) -> Option<u32> {
        self.topmost
    }

    pub fn set_topmost(&mut self, id: Option<u32>) {
        if let Some(previous) = self.topmost.take() {
            if let Some(record) = self.records.get_mut(&previous) {
                record.was_topmost = false;
            }
        }
        if let Some(id) = id {
            if let Some(record) = self.records.get_mut(&id) {
                record.was_topmost = true;
            }
        }
        self.topmost = id;
    }

    pub fn captured(&self) -> Option<(u32, PointerButton)> {
        self.captured
    }

    /// Claims the press capture for `id`. At most one capture exists per
    /// frame; a later claim while one is live is ignored.
    pub fn claim_capture(&mut self, id: u32, button: PointerButton) -> bool {
        if self.captured.is_some() {
            return false;
        }
        self.captured = Some((id, button));
        true
    }

    pub fn release_capture(&mut self) {
        self.captured = None;
    }

    /// Drops every record, e.g. on scene teardown. Also forgets the topmost
    /// flag and any live capture.
    pub fn clear(&mut self) {
        log::debug!("identity store cleared ({} records)", self.records.len());
        self.records.clear();
        self.topmost = None;
        self.captured = None;
    }

    /// Drops every record except the whitelisted ids. Topmost and capture
    /// survive only if their id is kept.
    pub fn clear_except(&mut self, keep: &[u32]) {
        self.records.retain(|id, _| keep.contains(id));
        if let Some(topmost) = self.topmost {
            if !keep.contains(&topmost) {
                self.topmost = None;
            }
        }
        if let Some((captured, _)) = self.captured {
            if !keep.contains(&captured) {
                self.captured = None;
            }
        }
        log::debug!("identity store trimmed to {} records", self.records.len());
    }
}
