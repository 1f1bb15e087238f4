use crate::api::config::TracerConfig;
use crate::api::error::TraceError;
use crate::api::types::TraceEvent;
use crate::core::catalog::{CoverageLetter, LetterEntry};
use crate::core::geometry::Point;
use crate::trace::coverage::CoverageEstimator;
use crate::trace::engine::{TraceEngine, TraceResult};

/// Common surface of the completion models.
///
/// Pointer handlers never fail for well-formed input; an `Err` means the
/// tracker's own state is inconsistent with its letter.
pub trait CompletionTracker {
    fn letter_id(&self) -> char;
    fn pointer_down(&mut self, pos: Point) -> Result<TraceResult, TraceError>;
    fn pointer_move(&mut self, pos: Point) -> Result<TraceResult, TraceError>;
    fn pointer_up(&mut self) -> Result<TraceResult, TraceError>;
    /// Completion in `[0, 1]`.
    fn progress(&self) -> f32;
    fn is_complete(&self) -> bool;
    fn drain_events(&mut self) -> Vec<TraceEvent>;
}

impl CompletionTracker for TraceEngine {
    fn letter_id(&self) -> char {
        self.letter().id()
    }

    fn pointer_down(&mut self, pos: Point) -> Result<TraceResult, TraceError> {
        self.begin_stroke(pos)
    }

    fn pointer_move(&mut self, pos: Point) -> Result<TraceResult, TraceError> {
        self.continue_stroke(pos)
    }

    fn pointer_up(&mut self) -> Result<TraceResult, TraceError> {
        self.end_stroke()
    }

    fn progress(&self) -> f32 {
        TraceEngine::progress(self)
    }

    fn is_complete(&self) -> bool {
        self.state().is_letter_complete
    }

    fn drain_events(&mut self) -> Vec<TraceEvent> {
        TraceEngine::drain_events(self)
    }
}

/// Free-hand painting over a glyph, scored by coverage.
pub struct CoverageTracer {
    letter: CoverageLetter,
    estimator: CoverageEstimator,
    is_drawing: bool,
    /// One polyline per pointer-down.
    trail: Vec<Vec<Point>>,
    events: Vec<TraceEvent>,
}

impl CoverageTracer {
    pub fn new(letter: CoverageLetter, config: &TracerConfig) -> Self {
        let estimator = CoverageEstimator::for_region(letter.region(), &config.coverage);
        Self {
            letter,
            estimator,
            is_drawing: false,
            trail: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn letter(&self) -> &CoverageLetter {
        &self.letter
    }

    pub fn estimator(&self) -> &CoverageEstimator {
        &self.estimator
    }

    pub fn trail(&self) -> &[Vec<Point>] {
        &self.trail
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    fn stamp(&mut self, pos: Point) {
        let update = self.estimator.stamp(pos);
        if update.crossed_threshold {
            log::info!(
                "'{}' coverage reached {:.0}%",
                self.letter.id(),
                self.estimator.percentage()
            );
            self.events.push(TraceEvent::CoverageReached {
                percent: self.estimator.percentage(),
            });
        }
    }
}

impl CompletionTracker for CoverageTracer {
    fn letter_id(&self) -> char {
        self.letter.id()
    }

    fn pointer_down(&mut self, pos: Point) -> Result<TraceResult, TraceError> {
        if self.is_drawing {
            return Ok(TraceResult::Ignored);
        }
        self.is_drawing = true;
        self.trail.push(vec![pos]);
        self.stamp(pos);
        Ok(TraceResult::Accepted)
    }

    fn pointer_move(&mut self, pos: Point) -> Result<TraceResult, TraceError> {
        if !self.is_drawing {
            return Ok(TraceResult::Ignored);
        }
        if let Some(line) = self.trail.last_mut() {
            line.push(pos);
        }
        self.stamp(pos);
        Ok(TraceResult::Accepted)
    }

    fn pointer_up(&mut self) -> Result<TraceResult, TraceError> {
        if !self.is_drawing {
            return Ok(TraceResult::Ignored);
        }
        self.is_drawing = false;
        Ok(TraceResult::Released)
    }

    fn progress(&self) -> f32 {
        self.estimator.coverage()
    }

    fn is_complete(&self) -> bool {
        self.estimator.has_celebrated()
    }

    fn drain_events(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.events)
    }
}

/// The completion model chosen for a catalog entry.
pub enum Tracker {
    Guided(TraceEngine),
    Coverage(CoverageTracer),
}

impl Tracker {
    pub fn for_entry(entry: &LetterEntry, config: &TracerConfig) -> Result<Self, TraceError> {
        Ok(match entry {
            LetterEntry::Guided(letter) => {
                Self::Guided(TraceEngine::new(letter.clone(), config.tolerances)?)
            }
            LetterEntry::Coverage(letter) => {
                Self::Coverage(CoverageTracer::new(letter.clone(), config))
            }
        })
    }

    pub fn as_dyn(&self) -> &dyn CompletionTracker {
        match self {
            Self::Guided(engine) => engine,
            Self::Coverage(tracer) => tracer,
        }
    }

    pub fn as_dyn_mut(&mut self) -> &mut dyn CompletionTracker {
        match self {
            Self::Guided(engine) => engine,
            Self::Coverage(tracer) => tracer,
        }
    }

    pub fn letter_id(&self) -> char {
        self.as_dyn().letter_id()
    }

    /// Index of the active stroke, or 0 for coverage letters.
    pub fn current_stroke(&self) -> usize {
        match self {
            Self::Guided(engine) => engine.state().current_stroke,
            Self::Coverage(_) => 0,
        }
    }
}
