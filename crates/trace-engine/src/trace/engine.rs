use crate::api::config::Tolerances;
use crate::api::error::TraceError;
use crate::api::types::{RejectReason, TraceEvent};
use crate::core::catalog::{LetterDefinition, Stroke};
use crate::core::geometry::{distance, distance_to_segment, Point, Segment};

/// Coarse phase of a tracing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracePhase {
    /// Waiting for a pointer-down near the next guide point.
    Idle,
    /// A stroke attempt is in progress.
    Tracing,
    /// Every stroke has been traced. Input is ignored until reset.
    LetterComplete,
}

/// Result of feeding one pointer event to a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceResult {
    /// Pointer-down accepted, or a move recorded without reaching the target.
    Accepted,
    /// Pointer-down too far from the expected guide point.
    NotStarted,
    /// Move strayed off the active segment; the attempt was dropped.
    Rejected,
    /// The target guide point was reached and the stroke continues.
    PointReached,
    /// The current stroke was finished and the next one is active.
    StrokeComplete,
    /// The last stroke was finished.
    LetterComplete,
    /// Pointer-up ended an attempt.
    Released,
    /// Nothing to do (e.g. move while idle).
    Ignored,
}

/// Everything the engine knows about one letter attempt.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TraceState {
    /// Index of the stroke being traced; equals the stroke count once complete.
    pub current_stroke: usize,
    /// Index of the next guide point to reach in the current stroke.
    pub next_point: usize,
    /// Whether a pointer-down was accepted and not yet released or rejected.
    pub is_drawing: bool,
    /// Pointer samples since the last banked guide point (rendering only).
    pub live_points: Vec<Point>,
    /// Every accepted hop, in order.
    pub completed_segments: Vec<Segment>,
    pub is_letter_complete: bool,
}

impl TraceState {
    pub fn phase(&self) -> TracePhase {
        if self.is_letter_complete {
            TracePhase::LetterComplete
        } else if self.is_drawing {
            TracePhase::Tracing
        } else {
            TracePhase::Idle
        }
    }
}

/// Verifies pointer input against a multi-stroke letter.
///
/// Strokes are traced in order, guide point by guide point. A pointer-down
/// near the first point of a stroke snaps onto it; every later guide point
/// has to be reached by moving along the segment that leads to it. Drifting
/// further than the stray tolerance from that segment drops the attempt but
/// keeps everything banked so far.
pub struct TraceEngine {
    letter: LetterDefinition,
    tolerances: Tolerances,
    state: TraceState,
    /// Events since the last drain.
    events: Vec<TraceEvent>,
}

impl TraceEngine {
    pub fn new(letter: LetterDefinition, tolerances: Tolerances) -> Result<Self, TraceError> {
        tolerances.validate()?;
        Ok(Self {
            letter,
            tolerances,
            state: TraceState::default(),
            events: Vec::with_capacity(8),
        })
    }

    /// Replace the whole state with a fresh attempt at `letter`.
    pub fn reset(&mut self, letter: LetterDefinition) {
        self.letter = letter;
        self.state = TraceState::default();
        self.events.clear();
    }

    pub fn letter(&self) -> &LetterDefinition {
        &self.letter
    }

    pub fn state(&self) -> &TraceState {
        &self.state
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    pub fn phase(&self) -> TracePhase {
        self.state.phase()
    }

    /// The guide point the user is expected to reach next, if any.
    pub fn target(&self) -> Option<Point> {
        self.letter
            .stroke(self.state.current_stroke)
            .and_then(|stroke| stroke.get(self.state.next_point))
    }

    /// Fraction of guide points banked so far (0.0 - 1.0).
    pub fn progress(&self) -> f32 {
        let total = self.letter.total_points();
        if total == 0 {
            return 0.0;
        }
        let banked: usize = self.letter.strokes()[..self.state.current_stroke]
            .iter()
            .map(Stroke::len)
            .sum::<usize>()
            + self.state.next_point;
        banked as f32 / total as f32
    }

    /// Take the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Handle pointer down.
    ///
    /// At the start of a stroke the pointer only has to land within the start
    /// tolerance; the first guide point is then banked immediately. When
    /// resuming mid-stroke it has to land within the hit tolerance of the
    /// next target.
    pub fn begin_stroke(&mut self, pos: Point) -> Result<TraceResult, TraceError> {
        if self.state.is_letter_complete || self.state.is_drawing {
            return Ok(TraceResult::Ignored);
        }

        let stroke_len = self.current_stroke()?.len();
        let target = self.target_point()?;
        let tolerance = if self.state.next_point == 0 {
            self.tolerances.start
        } else {
            self.tolerances.hit
        };

        let dist = distance(pos, target);
        if dist >= tolerance {
            self.events
                .push(TraceEvent::InputRejected(RejectReason::OffTarget { distance: dist }));
            return Ok(TraceResult::NotStarted);
        }

        self.state.is_drawing = true;
        self.state.live_points.clear();
        self.state.live_points.push(pos);

        if self.state.next_point == 0 {
            self.state.next_point = 1;
            if stroke_len == 1 {
                return Ok(self.finish_stroke());
            }
        }

        Ok(TraceResult::Accepted)
    }

    /// Handle pointer move.
    ///
    /// The stray check runs first and measures against the whole segment, so
    /// a pointer arriving slightly early near the target is never punished.
    pub fn continue_stroke(&mut self, pos: Point) -> Result<TraceResult, TraceError> {
        if !self.state.is_drawing {
            return Ok(TraceResult::Ignored);
        }

        let (reference, target, stroke_len) = self.active_segment()?;

        let stray = distance_to_segment(pos, reference, target);
        if stray > self.tolerances.stray {
            self.state.is_drawing = false;
            self.state.live_points.clear();
            self.events
                .push(TraceEvent::InputRejected(RejectReason::Strayed { distance: stray }));
            log::debug!(
                "'{}' stroke {}: strayed {:.1} from segment",
                self.letter.id(),
                self.state.current_stroke,
                stray
            );
            return Ok(TraceResult::Rejected);
        }

        if distance(pos, target) < self.tolerances.hit {
            self.state
                .completed_segments
                .push(Segment::new(reference, target));
            self.events.push(TraceEvent::SegmentAccepted {
                from: reference,
                to: target,
            });
            self.state.live_points.clear();
            self.state.live_points.push(target);
            self.state.next_point += 1;

            if self.state.next_point == stroke_len {
                return Ok(self.finish_stroke());
            }
            return Ok(TraceResult::PointReached);
        }

        self.state.live_points.push(pos);
        Ok(TraceResult::Accepted)
    }

    /// Handle pointer up / cancel.
    ///
    /// The live trail is kept only when it ends on the target; banked guide
    /// points are never lost.
    pub fn end_stroke(&mut self) -> Result<TraceResult, TraceError> {
        if !self.state.is_drawing {
            return Ok(TraceResult::Ignored);
        }

        let target = self.target_point()?;
        let landed = self
            .state
            .live_points
            .last()
            .is_some_and(|&p| distance(p, target) < self.tolerances.hit);
        if !landed {
            self.state.live_points.clear();
        }
        self.state.is_drawing = false;
        Ok(TraceResult::Released)
    }

    fn current_stroke(&self) -> Result<&Stroke, TraceError> {
        self.letter
            .stroke(self.state.current_stroke)
            .ok_or(TraceError::StrokeOutOfRange {
                index: self.state.current_stroke,
                len: self.letter.stroke_count(),
            })
    }

    fn target_point(&self) -> Result<Point, TraceError> {
        let stroke = self.current_stroke()?;
        stroke
            .get(self.state.next_point)
            .ok_or(TraceError::PointOutOfRange {
                index: self.state.next_point,
                len: stroke.len(),
            })
    }

    /// Previous guide point, target guide point, and stroke length.
    fn active_segment(&self) -> Result<(Point, Point, usize), TraceError> {
        let stroke = self.current_stroke()?;
        let target = self.target_point()?;
        // The first guide point is banked on pointer-down, so while drawing
        // there is always a previous point.
        let reference = self
            .state
            .next_point
            .checked_sub(1)
            .and_then(|i| stroke.get(i))
            .ok_or(TraceError::PointOutOfRange {
                index: self.state.next_point,
                len: stroke.len(),
            })?;
        Ok((reference, target, stroke.len()))
    }

    fn finish_stroke(&mut self) -> TraceResult {
        self.state.live_points.clear();
        self.state.is_drawing = false;
        self.state.current_stroke += 1;
        self.state.next_point = 0;

        if self.state.current_stroke == self.letter.stroke_count() {
            self.state.is_letter_complete = true;
            self.events.push(TraceEvent::LetterCompleted);
            log::info!("'{}' complete", self.letter.id());
            TraceResult::LetterComplete
        } else {
            self.events.push(TraceEvent::StrokeAdvanced {
                stroke: self.state.current_stroke,
            });
            log::debug!(
                "'{}' advanced to stroke {}",
                self.letter.id(),
                self.state.current_stroke
            );
            TraceResult::StrokeComplete
        }
    }
}
