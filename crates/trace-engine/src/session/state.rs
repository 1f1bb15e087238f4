use crate::api::config::TracerConfig;
use crate::api::error::SessionError;
use crate::api::types::{RejectReason, SessionId, TraceEvent};
use crate::core::catalog::{LetterCatalog, LetterEntry};
use crate::core::geometry::Point;
use crate::core::time::DelayedSignals;
use crate::input::queue::{InputEvent, InputQueue, NavCommand};
use crate::session::toast::{ToastKind, ToastQueue};
use crate::trace::engine::TraceResult;
use crate::trace::tracker::Tracker;

/// Everything the UI layer may react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// A letter was (re)loaded with fresh state.
    LetterLoaded { index: usize, letter: char },
    Trace(TraceEvent),
    CelebrationStarted,
    CelebrationEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    AutoAdvance,
    EndCelebration,
}

/// One learner working through a catalog, one letter at a time.
///
/// Owns the active tracker and replaces it wholesale on every load. Timed
/// signals carry the session id that scheduled them and are dropped when that
/// id is no longer current.
pub struct TracingSession {
    catalog: LetterCatalog,
    config: TracerConfig,
    index: usize,
    tracker: Tracker,
    session: SessionId,
    signals: DelayedSignals<Signal>,
    toasts: ToastQueue,
    celebrating: bool,
    events: Vec<SessionEvent>,
}

impl TracingSession {
    /// Start at the first letter of `catalog`.
    pub fn new(catalog: LetterCatalog, config: TracerConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let entry = catalog.get(0).ok_or(SessionError::IndexOutOfRange {
            index: 0,
            len: catalog.len(),
        })?;
        let tracker = Tracker::for_entry(entry, &config)?;
        let toasts = ToastQueue::new(config.toast_secs);
        log::info!("session started with {} letters", catalog.len());

        let mut session = Self {
            catalog,
            config,
            index: 0,
            tracker,
            session: SessionId::default(),
            signals: DelayedSignals::new(),
            toasts,
            celebrating: false,
            events: Vec::with_capacity(16),
        };
        session.events.push(SessionEvent::LetterLoaded {
            index: 0,
            letter: session.tracker.letter_id(),
        });
        Ok(session)
    }

    pub fn catalog(&self) -> &LetterCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_letter(&self) -> char {
        self.tracker.letter_id()
    }

    pub fn current_entry(&self) -> Option<&LetterEntry> {
        self.catalog.get(self.index)
    }

    pub fn session_id(&self) -> SessionId {
        self.session
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    /// Completion of the current letter in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.tracker.as_dyn().progress()
    }

    pub fn is_letter_complete(&self) -> bool {
        self.tracker.as_dyn().is_complete()
    }

    /// Take the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Selection surface --

    pub fn next(&mut self) -> Result<(), SessionError> {
        self.load(self.catalog.next_index(self.index))
    }

    pub fn previous(&mut self) -> Result<(), SessionError> {
        self.load(self.catalog.previous_index(self.index))
    }

    pub fn reset_current(&mut self) -> Result<(), SessionError> {
        self.load(self.index)
    }

    pub fn select(&mut self, letter: char) -> Result<(), SessionError> {
        let index = self
            .catalog
            .index_of(letter)
            .ok_or(SessionError::UnknownLetter(letter))?;
        self.load(index)
    }

    pub fn select_index(&mut self, index: usize) -> Result<(), SessionError> {
        self.load(index)
    }

    /// Replace all per-letter state with a fresh attempt at `index`.
    /// On error nothing changes.
    fn load(&mut self, index: usize) -> Result<(), SessionError> {
        let entry = self.catalog.get(index).ok_or(SessionError::IndexOutOfRange {
            index,
            len: self.catalog.len(),
        })?;
        let tracker = Tracker::for_entry(entry, &self.config)?;

        self.tracker = tracker;
        self.index = index;
        self.session = self.session.next();
        self.toasts.clear();
        self.celebrating = false;
        let letter = self.tracker.letter_id();
        self.events.push(SessionEvent::LetterLoaded { index, letter });
        log::info!("loaded '{}' (#{}, session {})", letter, index, self.session.0);
        Ok(())
    }

    // -- Pointer input --

    pub fn pointer_down(&mut self, pos: Point) -> Result<TraceResult, SessionError> {
        let result = self.tracker.as_dyn_mut().pointer_down(pos)?;
        self.collect_trace_events();
        Ok(result)
    }

    pub fn pointer_move(&mut self, pos: Point) -> Result<TraceResult, SessionError> {
        let result = self.tracker.as_dyn_mut().pointer_move(pos)?;
        self.collect_trace_events();
        Ok(result)
    }

    pub fn pointer_up(&mut self) -> Result<TraceResult, SessionError> {
        let result = self.tracker.as_dyn_mut().pointer_up()?;
        self.collect_trace_events();
        Ok(result)
    }

    /// Apply every queued input event in order. A failing event is logged and
    /// skipped; the rest still run.
    pub fn process(&mut self, input: &mut InputQueue) {
        for event in input.drain() {
            let outcome = match event {
                InputEvent::PointerDown { x, y } => self.pointer_down(Point::new(x, y)).map(drop),
                InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(x, y)).map(drop),
                InputEvent::PointerUp { .. } | InputEvent::PointerCancel => {
                    self.pointer_up().map(drop)
                }
                InputEvent::Command(NavCommand::Next) => self.next(),
                InputEvent::Command(NavCommand::Previous) => self.previous(),
                InputEvent::Command(NavCommand::Reset) => self.reset_current(),
                InputEvent::Command(NavCommand::Select(letter)) => self.select(letter),
            };
            if let Err(err) = outcome {
                log::warn!("input {:?} failed: {}", event, err);
            }
        }
    }

    /// Advance timers and toasts by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.toasts.tick(dt);

        for (session, signal) in self.signals.tick(dt) {
            if session != self.session {
                log::debug!("dropping {:?} from stale session {}", signal, session.0);
                continue;
            }
            match signal {
                Signal::AutoAdvance => {
                    if let Err(err) = self.next() {
                        log::warn!("auto-advance failed: {}", err);
                    }
                }
                Signal::EndCelebration => {
                    self.celebrating = false;
                    self.events.push(SessionEvent::CelebrationEnded);
                }
            }
        }
    }

    fn collect_trace_events(&mut self) {
        for event in self.tracker.as_dyn_mut().drain_events() {
            match event {
                TraceEvent::StrokeAdvanced { .. } => {
                    self.toasts.push(ToastKind::Info, "Correct! On to the next stroke.");
                }
                TraceEvent::LetterCompleted => {
                    self.toasts.push(ToastKind::Success, "Great job! Letter complete!");
                    self.signals
                        .schedule(self.session, self.config.auto_advance_secs, Signal::AutoAdvance);
                }
                TraceEvent::InputRejected(RejectReason::Strayed { .. }) => {
                    self.toasts.push(ToastKind::Error, "A little off the line! Try again.");
                }
                TraceEvent::CoverageReached { .. } => {
                    self.celebrating = true;
                    self.events.push(SessionEvent::CelebrationStarted);
                    self.signals.schedule(
                        self.session,
                        self.config.coverage.celebration_secs,
                        Signal::EndCelebration,
                    );
                }
                TraceEvent::SegmentAccepted { .. }
                | TraceEvent::InputRejected(RejectReason::OffTarget { .. }) => {}
            }
            self.events.push(SessionEvent::Trace(event));
        }
    }
}
