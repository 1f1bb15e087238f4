use glam::Vec2;

/// Identity of one letter load.
///
/// Bumped every time a letter is (re)loaded so delayed signals scheduled
/// against an earlier load can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SessionId(pub u64);

impl SessionId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Why a piece of pointer input was not accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RejectReason {
    /// Pointer went down too far from the expected guide point.
    OffTarget { distance: f32 },
    /// Pointer drifted too far from the segment being traced.
    Strayed { distance: f32 },
}

impl RejectReason {
    /// Numeric code used on the wire.
    pub fn code(&self) -> u32 {
        match self {
            Self::OffTarget { .. } => 1,
            Self::Strayed { .. } => 2,
        }
    }

    /// Distance that caused the rejection.
    pub fn distance(&self) -> f32 {
        match *self {
            Self::OffTarget { distance } | Self::Strayed { distance } => distance,
        }
    }
}

/// State deltas emitted by a completion tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceEvent {
    /// The hop between two guide points was traced.
    SegmentAccepted { from: Vec2, to: Vec2 },
    /// A stroke was finished and `stroke` is now the active one.
    StrokeAdvanced { stroke: usize },
    /// The final stroke was finished.
    LetterCompleted,
    /// Input was refused. Banked progress is kept.
    InputRejected(RejectReason),
    /// Pixel coverage crossed the celebration threshold.
    CoverageReached { percent: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_increase() {
        let id = SessionId::default();
        assert_eq!(id.next(), SessionId(1));
        assert!(id.next().next() > id.next());
    }

    #[test]
    fn reject_reason_codes() {
        let off = RejectReason::OffTarget { distance: 55.0 };
        let stray = RejectReason::Strayed { distance: 31.5 };
        assert_eq!(off.code(), 1);
        assert_eq!(stray.code(), 2);
        assert_eq!(stray.distance(), 31.5);
    }
}
