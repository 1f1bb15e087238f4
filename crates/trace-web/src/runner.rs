use trace_engine::{
    build_draw_list, DrawList, EventBuffer, InputEvent, InputQueue, LetterCatalog, RenderStyle,
    SessionError, TracerConfig, TracingSession,
};
#[cfg(feature = "vectors")]
use trace_engine::VectorState;

/// Owns the tracing session and everything the browser reads back each tick.
///
/// wasm-bindgen cannot export this directly with its engine types, so `lib.rs`
/// keeps one in a `thread_local!` and forwards free functions to it.
pub struct TracerRunner {
    session: TracingSession,
    input: InputQueue,
    style: RenderStyle,
    draw_list: DrawList,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
    events: EventBuffer,
}

impl TracerRunner {
    /// Empty strings select the default config and the builtin catalog.
    pub fn new(config_json: &str, catalog_json: &str) -> Result<Self, SessionError> {
        let config = if config_json.trim().is_empty() {
            TracerConfig::default()
        } else {
            TracerConfig::from_json(config_json)?
        };
        let catalog = if catalog_json.trim().is_empty() {
            LetterCatalog::builtin()
        } else {
            LetterCatalog::from_json(catalog_json)?
        };
        let events = EventBuffer::new(config.max_events);
        let session = TracingSession::new(catalog, config)?;

        let mut runner = Self {
            session,
            input: InputQueue::new(),
            style: RenderStyle::default(),
            draw_list: DrawList::new(),
            #[cfg(feature = "vectors")]
            vectors: VectorState::new(),
            events,
        };
        runner.redraw();
        Ok(runner)
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Apply queued input, advance timers, export events, and redraw.
    pub fn tick(&mut self, dt: f32) {
        self.events.clear();
        self.session.process(&mut self.input);
        self.session.tick(dt);
        let events = self.session.drain_events();
        self.events.extend(&events);
        self.redraw();
    }

    fn redraw(&mut self) {
        let config = self.session.config();
        self.draw_list = build_draw_list(
            self.session.tracker(),
            &self.style,
            config.canvas_width,
            config.canvas_height,
        );
        #[cfg(feature = "vectors")]
        self.vectors.tessellate(&self.draw_list);
    }

    pub fn session(&self) -> &TracingSession {
        &self.session
    }

    pub fn dismiss_toast(&mut self, id: u64) -> bool {
        self.session.toasts_mut().remove(id)
    }

    // ---- Pointer accessors for buffer reads ----

    #[cfg(feature = "vectors")]
    pub fn vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.buffer_ptr()
    }

    pub fn events_len(&self) -> u32 {
        self.events.len() as u32
    }

    // ---- JSON exports ----

    pub fn labels_json(&self) -> String {
        self.draw_list.labels_json().unwrap_or_else(|err| {
            log::warn!("labels export failed: {}", err);
            "[]".to_string()
        })
    }

    pub fn toasts_json(&self) -> String {
        self.session.toasts().to_json().unwrap_or_else(|err| {
            log::warn!("toast export failed: {}", err);
            "[]".to_string()
        })
    }

    /// Snapshot of what the page chrome shows around the canvas.
    pub fn status_json(&self) -> String {
        let session = &self.session;
        serde_json::json!({
            "letter": session.current_letter().to_string(),
            "index": session.current_index(),
            "stroke": session.tracker().current_stroke(),
            "progress": self.progress_percent(),
            "complete": session.is_letter_complete(),
            "celebrating": session.is_celebrating(),
        })
        .to_string()
    }

    pub fn progress_percent(&self) -> f32 {
        (self.session.progress() * 100.0).min(100.0)
    }

    pub fn canvas_width(&self) -> f32 {
        self.session.config().canvas_width
    }

    pub fn canvas_height(&self) -> f32 {
        self.session.config().canvas_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trace_engine::NavCommand;

    #[test]
    fn defaults_start_on_first_builtin_letter() {
        let mut runner = TracerRunner::new("", "").unwrap();
        assert_eq!(runner.session().current_letter(), 'A');
        runner.tick(0.016);
        // Initial load is reported on the first tick.
        assert_eq!(runner.events_len(), 1);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(matches!(
            TracerRunner::new("{", ""),
            Err(SessionError::Config(_))
        ));
        assert!(matches!(
            TracerRunner::new("", r#"{"letters": []}"#),
            Err(SessionError::Catalog(_))
        ));
    }

    #[test]
    fn input_is_applied_on_tick() {
        let mut runner = TracerRunner::new("", "").unwrap();
        runner.push_input(InputEvent::Command(NavCommand::Select('L')));
        assert_eq!(runner.session().current_letter(), 'A');
        runner.tick(0.016);
        assert_eq!(runner.session().current_letter(), 'L');
        assert!(runner.status_json().contains(r#""letter":"L""#));
    }

    #[test]
    fn events_export_as_wire_floats() {
        let mut runner = TracerRunner::new("", "").unwrap();
        runner.tick(0.016);
        let floats = unsafe { std::slice::from_raw_parts(runner.events_ptr(), 4) };
        assert_eq!(floats[0], trace_engine::bridge::protocol::KIND_LETTER_LOADED);
        assert_eq!(floats[1], 0.0);
        assert_eq!(floats[2], 'A' as u32 as f32);
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn scene_is_tessellated() {
        let runner = TracerRunner::new("", "").unwrap();
        assert!(runner.vertex_count() > 0);
        assert_eq!(runner.labels_json().matches("\"text\"").count(), 2);
    }
}
