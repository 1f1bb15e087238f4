pub mod api;
pub mod bridge;
pub mod core;
pub mod input;
pub mod render;
pub mod session;
pub mod trace;

// Re-export key types at crate root for convenience
pub use api::config::{CoverageConfig, Tolerances, TracerConfig};
pub use api::error::{CatalogError, ConfigError, SessionError, TraceError};
pub use api::types::{RejectReason, SessionId, TraceEvent};
pub use bridge::protocol::{EventBuffer, WireEvent};
pub use core::catalog::{CoverageLetter, GlyphRegion, LetterCatalog, LetterDefinition, LetterEntry, Stroke};
pub use core::geometry::{distance, distance_to_segment, Point, Segment};
pub use core::time::DelayedSignals;
pub use input::queue::{InputEvent, InputQueue, NavCommand};
pub use render::scene::{build_draw_list, DrawCommand, DrawList, GuideLabel};
pub use render::style::{Color, RenderStyle};
pub use session::state::{SessionEvent, TracingSession};
pub use session::toast::{Toast, ToastKind, ToastQueue};
pub use trace::coverage::{CoverageEstimator, CoverageUpdate};
pub use trace::engine::{TraceEngine, TracePhase, TraceResult, TraceState};
pub use trace::tracker::{CompletionTracker, CoverageTracer, Tracker};

#[cfg(feature = "vectors")]
pub use render::vector::{VectorState, VectorVertex};
