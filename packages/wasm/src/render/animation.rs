//! Staggered entrance schedule.
//!
//! A node is revealed `level * 0.2 + sibling_index * 0.1` seconds after the
//! diagram appears, and its label 0.2 seconds after that. Times are kept in
//! integer tenths of a second so ordering is exact.
//!
//! The schedule is presentation only. Nothing in the engine waits on it:
//! nodes are hit-testable and selectable before they are revealed.

use serde::Serialize;

use crate::tree::{MindMapDocument, NodeKey};

/// Delay added per level, in tenths of a second.
pub const LEVEL_STAGGER_TENTHS: u32 = 2;
/// Delay added per preceding sibling, in tenths of a second.
pub const SIBLING_STAGGER_TENTHS: u32 = 1;
/// Lag between a node and its label, in tenths of a second.
pub const LABEL_LAG_TENTHS: u32 = 2;

/// What becomes visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealTarget {
    Node,
    Label,
}

/// One "became visible" event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealEvent {
    pub key: NodeKey,
    pub target: RevealTarget,
    /// Offset from the start of the entrance, in tenths of a second.
    pub at_tenths: u32,
    /// Offset from the start of the entrance, in seconds.
    pub delay: f32,
}

/// Node reveal offset in tenths of a second.
#[inline]
pub fn reveal_tenths(level: u32, sibling_index: u32) -> u32 {
    level * LEVEL_STAGGER_TENTHS + sibling_index * SIBLING_STAGGER_TENTHS
}

/// Node reveal offset in seconds.
#[inline]
pub fn reveal_delay(level: u32, sibling_index: u32) -> f32 {
    tenths_to_secs(reveal_tenths(level, sibling_index))
}

#[inline]
fn tenths_to_secs(tenths: u32) -> f32 {
    tenths as f32 / 10.0
}

/// Whole tenths elapsed, or None before the entrance starts.
fn elapsed_tenths(elapsed_secs: f32) -> Option<u32> {
    if !(elapsed_secs >= 0.0) {
        return None;
    }
    // Small bias so 0.3 s is not read as 2.999... tenths.
    Some((elapsed_secs * 10.0 + 1e-3).floor() as u32)
}

/// Reveal events for a whole document, ordered by time then draw order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RevealSchedule {
    events: Vec<RevealEvent>,
}

impl RevealSchedule {
    pub fn new(doc: &MindMapDocument) -> Self {
        let mut events = Vec::with_capacity(doc.count_nodes() * 2);

        for (key, node) in doc.walk() {
            let node_tenths = reveal_tenths(node.level, node.sibling_index);
            let label_tenths = node_tenths + LABEL_LAG_TENTHS;
            events.push(RevealEvent {
                key,
                target: RevealTarget::Node,
                at_tenths: node_tenths,
                delay: tenths_to_secs(node_tenths),
            });
            events.push(RevealEvent {
                key,
                target: RevealTarget::Label,
                at_tenths: label_tenths,
                delay: tenths_to_secs(label_tenths),
            });
        }

        events.sort_by_key(|e| (e.at_tenths, e.key, e.target));
        Self { events }
    }

    /// Lazily walk the schedule from the start. Call again to restart.
    pub fn events(&self) -> impl Iterator<Item = &RevealEvent> + '_ {
        self.events.iter()
    }

    /// Node keys whose circle is visible `elapsed_secs` into the entrance.
    pub fn visible_at(&self, elapsed_secs: f32) -> impl Iterator<Item = NodeKey> + '_ {
        let limit = elapsed_tenths(elapsed_secs);
        self.events
            .iter()
            .take_while(move |e| limit.is_some_and(|t| e.at_tenths <= t))
            .filter(|e| e.target == RevealTarget::Node)
            .map(|e| e.key)
    }

    /// Seconds until the last event fires.
    pub fn duration(&self) -> f32 {
        self.events.last().map_or(0.0, |e| e.delay)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn as_slice(&self) -> &[RevealEvent] {
        &self.events
    }
}

/// Playback position within a [`RevealSchedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealCursor {
    next: usize,
}

impl RevealCursor {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Events that became due by `elapsed_secs` since the last call.
    ///
    /// `elapsed_secs` is measured from the start of the entrance, not from the
    /// previous call.
    pub fn advance<'a>(&mut self, schedule: &'a RevealSchedule, elapsed_secs: f32) -> &'a [RevealEvent] {
        let Some(limit) = elapsed_tenths(elapsed_secs) else {
            return &[];
        };
        let pending = schedule.as_slice().get(self.next..).unwrap_or(&[]);
        let due = pending.iter().take_while(|e| e.at_tenths <= limit).count();
        let start = self.next;
        self.next += due;
        &schedule.as_slice()[start..self.next]
    }

    /// Replay the entrance from the beginning.
    pub fn restart(&mut self) {
        self.next = 0;
    }

    pub fn is_finished(&self, schedule: &RevealSchedule) -> bool {
        self.next >= schedule.len()
    }
}
