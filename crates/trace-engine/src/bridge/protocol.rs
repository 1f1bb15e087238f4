//! Event export format shared with the JS side.
//! Must stay in sync with the TypeScript reader.
//!
//! Every event is four f32: `[kind, a, b, c]`.
//!
//! ```text
//! kind  meaning                 a              b          c
//!  1    segment accepted        to.x           to.y       -
//!  2    stroke advanced         stroke index   -          -
//!  3    letter completed        -              -          -
//!  4    input rejected          reason code    distance   -
//!  5    coverage reached        percent        -          -
//!  6    letter loaded           catalog index  letter     -
//!  7    celebration started     -              -          -
//!  8    celebration ended       -              -          -
//! ```
//!
//! Kind 1 carries only the segment's end. Its start is the `to` of the
//! previous kind 1 in the same stroke, or the stroke's first guide point when
//! it is the first hop after a stroke start; JS tracks that from the letter data.
//!
//! Reason codes: 1 = pointer-down off target, 2 = strayed off segment.
//! The letter in kind 6 is its Unicode scalar value.

use bytemuck::{Pod, Zeroable};

use crate::api::types::TraceEvent;
use crate::session::state::SessionEvent;

pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per event: kind, a, b, c (fixed wire format).
pub const EVENT_FLOATS: usize = 4;

pub const KIND_SEGMENT_ACCEPTED: f32 = 1.0;
pub const KIND_STROKE_ADVANCED: f32 = 2.0;
pub const KIND_LETTER_COMPLETED: f32 = 3.0;
pub const KIND_INPUT_REJECTED: f32 = 4.0;
pub const KIND_COVERAGE_REACHED: f32 = 5.0;
pub const KIND_LETTER_LOADED: f32 = 6.0;
pub const KIND_CELEBRATION_STARTED: f32 = 7.0;
pub const KIND_CELEBRATION_ENDED: f32 = 8.0;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct WireEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl WireEvent {
    const fn new(kind: f32, a: f32, b: f32) -> Self {
        Self { kind, a, b, c: 0.0 }
    }

    pub fn encode(event: &SessionEvent) -> Self {
        match *event {
            SessionEvent::Trace(trace) => Self::encode_trace(&trace),
            SessionEvent::LetterLoaded { index, letter } => {
                Self::new(KIND_LETTER_LOADED, index as f32, letter as u32 as f32)
            }
            SessionEvent::CelebrationStarted => Self::new(KIND_CELEBRATION_STARTED, 0.0, 0.0),
            SessionEvent::CelebrationEnded => Self::new(KIND_CELEBRATION_ENDED, 0.0, 0.0),
        }
    }

    /// `SegmentAccepted` keeps only `to`; see the module docs for how the
    /// reader recovers `from`.
    pub fn encode_trace(event: &TraceEvent) -> Self {
        match *event {
            TraceEvent::SegmentAccepted { to, .. } => Self::new(KIND_SEGMENT_ACCEPTED, to.x, to.y),
            TraceEvent::StrokeAdvanced { stroke } => {
                Self::new(KIND_STROKE_ADVANCED, stroke as f32, 0.0)
            }
            TraceEvent::LetterCompleted => Self::new(KIND_LETTER_COMPLETED, 0.0, 0.0),
            TraceEvent::InputRejected(reason) => {
                Self::new(KIND_INPUT_REJECTED, reason.code() as f32, reason.distance())
            }
            TraceEvent::CoverageReached { percent } => {
                Self::new(KIND_COVERAGE_REACHED, percent, 0.0)
            }
        }
    }
}

/// Fixed-capacity per-tick event buffer. Events past capacity are dropped.
pub struct EventBuffer {
    events: Vec<WireEvent>,
    capacity: usize,
    dropped: usize,
}

impl EventBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Encode and append. Returns false if the buffer was full.
    pub fn push(&mut self, event: &SessionEvent) -> bool {
        if self.events.len() >= self.capacity {
            self.dropped += 1;
            return false;
        }
        self.events.push(WireEvent::encode(event));
        true
    }

    pub fn extend<'a>(&mut self, events: impl IntoIterator<Item = &'a SessionEvent>) {
        for event in events {
            self.push(event);
        }
        if self.dropped > 0 {
            log::warn!("event buffer full, dropped {} events", self.dropped);
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn events(&self) -> &[WireEvent] {
        &self.events
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.events)
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.as_floats().as_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::RejectReason;
    use glam::Vec2;

    #[test]
    fn event_is_four_floats() {
        assert_eq!(std::mem::size_of::<WireEvent>(), EVENT_FLOATS * 4);
    }

    #[test]
    fn encodes_trace_events() {
        let seg = WireEvent::encode_trace(&TraceEvent::SegmentAccepted {
            from: Vec2::new(1.0, 2.0),
            to: Vec2::new(3.0, 4.0),
        });
        assert_eq!(seg, WireEvent { kind: 1.0, a: 3.0, b: 4.0, c: 0.0 });

        let rejected = WireEvent::encode_trace(&TraceEvent::InputRejected(
            RejectReason::Strayed { distance: 31.5 },
        ));
        assert_eq!(rejected, WireEvent { kind: 4.0, a: 2.0, b: 31.5, c: 0.0 });

        let advanced = WireEvent::encode_trace(&TraceEvent::StrokeAdvanced { stroke: 2 });
        assert_eq!(advanced.kind, KIND_STROKE_ADVANCED);
        assert_eq!(advanced.a, 2.0);
    }

    #[test]
    fn encodes_session_events() {
        let loaded = WireEvent::encode(&SessionEvent::LetterLoaded { index: 3, letter: 'a' });
        assert_eq!(loaded, WireEvent { kind: 6.0, a: 3.0, b: 97.0, c: 0.0 });
        assert_eq!(
            WireEvent::encode(&SessionEvent::Trace(TraceEvent::LetterCompleted)).kind,
            KIND_LETTER_COMPLETED
        );
        assert_eq!(WireEvent::encode(&SessionEvent::CelebrationEnded).kind, 8.0);
    }

    #[test]
    fn buffer_respects_capacity() {
        let mut buf = EventBuffer::new(2);
        let events = [
            SessionEvent::CelebrationStarted,
            SessionEvent::CelebrationEnded,
            SessionEvent::Trace(TraceEvent::LetterCompleted),
        ];
        buf.extend(&events);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.as_floats().len(), 8);
        assert_eq!(buf.as_floats()[4], KIND_CELEBRATION_ENDED);

        buf.clear();
        assert!(buf.is_empty());
        assert!(buf.push(&SessionEvent::CelebrationStarted));
    }
}
