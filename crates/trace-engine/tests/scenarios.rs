use std::collections::HashSet;

use glam::Vec2;
use trace_engine::{
    CatalogError, ConfigError, CoverageEstimator, LetterCatalog, LetterDefinition, LetterEntry, RejectReason, SessionEvent,
    Tolerances, TraceEngine, TraceEvent, TracePhase, TraceResult, TracerConfig, TracingSession,
};

fn letter_l() -> LetterDefinition {
    LetterDefinition::new(
        'L',
        vec![
            vec![Vec2::new(100.0, 50.0), Vec2::new(100.0, 350.0)],
            vec![Vec2::new(100.0, 350.0), Vec2::new(300.0, 350.0)],
        ],
    )
    .unwrap()
}

fn engine(letter: LetterDefinition) -> TraceEngine {
    TraceEngine::new(letter, Tolerances::default()).unwrap()
}

/// Drive every stroke exactly along its guide points. Returns all events.
fn trace_exactly(e: &mut TraceEngine) -> Vec<TraceEvent> {
    let mut events = Vec::new();
    let strokes: Vec<Vec<Vec2>> = e
        .letter()
        .strokes()
        .iter()
        .map(|s| s.points().to_vec())
        .collect();
    for stroke in strokes {
        e.begin_stroke(stroke[0]).unwrap();
        for &p in &stroke[1..] {
            let before = e.state().next_point;
            let stroke_before = e.state().current_stroke;
            e.continue_stroke(p).unwrap();
            let after = e.state();
            assert!(after.current_stroke >= stroke_before);
            if after.current_stroke == stroke_before {
                assert_eq!(after.next_point, before + 1);
            }
        }
        e.end_stroke().unwrap();
        events.extend(e.drain_events());
    }
    events
}

#[test]
fn scenario_a_letter_l() {
    let mut e = engine(letter_l());

    assert_eq!(e.begin_stroke(Vec2::new(100.0, 48.0)).unwrap(), TraceResult::Accepted);
    assert_eq!(
        e.continue_stroke(Vec2::new(100.0, 350.0)).unwrap(),
        TraceResult::StrokeComplete
    );
    assert_eq!(
        e.drain_events(),
        vec![
            TraceEvent::SegmentAccepted {
                from: Vec2::new(100.0, 50.0),
                to: Vec2::new(100.0, 350.0),
            },
            TraceEvent::StrokeAdvanced { stroke: 1 },
        ]
    );
    assert_eq!(e.state().current_stroke, 1);

    assert_eq!(e.begin_stroke(Vec2::new(102.0, 348.0)).unwrap(), TraceResult::Accepted);
    assert_eq!(
        e.continue_stroke(Vec2::new(300.0, 350.0)).unwrap(),
        TraceResult::LetterComplete
    );
    assert!(e.drain_events().contains(&TraceEvent::LetterCompleted));
    assert_eq!(e.state().current_stroke, 2);
    assert_eq!(e.state().current_stroke, e.letter().stroke_count());
    assert_eq!(e.phase(), TracePhase::LetterComplete);
}

#[test]
fn scenario_b_stray_rejection() {
    let mut e = engine(letter_l());
    e.begin_stroke(Vec2::new(100.0, 50.0)).unwrap();
    e.continue_stroke(Vec2::new(105.0, 120.0)).unwrap();
    assert_eq!(e.state().live_points.len(), 2);
    let next = e.state().next_point;

    let result = e.continue_stroke(Vec2::new(150.0, 200.0)).unwrap();
    assert_eq!(result, TraceResult::Rejected);
    assert_eq!(e.state().next_point, next);
    assert!(e.state().live_points.is_empty());
    assert_eq!(e.phase(), TracePhase::Idle);
    assert!(e
        .drain_events()
        .iter()
        .any(|ev| matches!(ev, TraceEvent::InputRejected(RejectReason::Strayed { distance }) if *distance == 50.0)));
}

#[test]
fn boundary_stray_right_after_begin() {
    let mut e = engine(letter_l());
    e.begin_stroke(Vec2::new(100.0, 50.0)).unwrap();
    let next = e.state().next_point;
    assert_eq!(
        e.continue_stroke(Vec2::new(131.0, 60.0)).unwrap(),
        TraceResult::Rejected
    );
    assert_eq!(e.state().next_point, next);
}

#[test]
fn round_trip_every_builtin_letter() {
    for entry in LetterCatalog::builtin().iter() {
        let LetterEntry::Guided(letter) = entry else {
            continue;
        };
        let mut e = engine(letter.clone());
        e.reset(letter.clone());
        let events = trace_exactly(&mut e);

        assert_eq!(e.phase(), TracePhase::LetterComplete, "letter '{}'", letter.id());
        let signals = events
            .iter()
            .filter(|ev| {
                matches!(ev, TraceEvent::StrokeAdvanced { .. } | TraceEvent::LetterCompleted)
            })
            .count();
        assert_eq!(signals, letter.stroke_count());
        assert_eq!(
            e.state().completed_segments.len(),
            letter.total_points() - letter.stroke_count()
        );
        assert!(!events
            .iter()
            .any(|ev| matches!(ev, TraceEvent::InputRejected(_))));
    }
}

#[test]
fn end_stroke_idle_is_idempotent() {
    let mut e = engine(letter_l());
    e.begin_stroke(Vec2::new(100.0, 50.0)).unwrap();
    e.end_stroke().unwrap();
    let before = e.state().clone();
    assert_eq!(e.end_stroke().unwrap(), TraceResult::Ignored);
    assert_eq!(e.state(), &before);
}

#[test]
fn misuse_while_idle_is_a_no_op() {
    let mut e = engine(letter_l());
    let before = e.state().clone();
    assert_eq!(e.continue_stroke(Vec2::new(0.0, 0.0)).unwrap(), TraceResult::Ignored);
    assert_eq!(e.end_stroke().unwrap(), TraceResult::Ignored);
    assert_eq!(e.state(), &before);
}

#[test]
fn scenario_c_coverage_threshold() {
    let traceable: HashSet<(i32, i32)> =
        (0..10).flat_map(|x| (0..10).map(move |y| (x, y))).collect();
    let mut est = CoverageEstimator::new(traceable, 0, 0.40);

    let mut celebrations = 0;
    for i in 0..40 {
        let update = est.stamp(Vec2::new((i % 10) as f32, (i / 10) as f32));
        if update.crossed_threshold {
            celebrations += 1;
            assert_eq!(i, 39);
        }
    }
    assert_eq!(est.coverage(), 0.40);
    for i in 40..55 {
        if est.stamp(Vec2::new((i % 10) as f32, (i / 10) as f32)).crossed_threshold {
            celebrations += 1;
        }
    }
    assert_eq!(celebrations, 1);
}

#[test]
fn session_auto_advance_is_dropped_after_manual_selection() {
    let catalog = LetterCatalog::builtin();
    let mut session = TracingSession::new(catalog, TracerConfig::default()).unwrap();
    let LetterEntry::Guided(first) = session.current_entry().unwrap().clone() else {
        panic!("first builtin letter should be guided");
    };

    for stroke in first.strokes() {
        session.pointer_down(stroke.first()).unwrap();
        for &p in &stroke.points()[1..] {
            session.pointer_move(p).unwrap();
        }
        session.pointer_up().unwrap();
    }
    assert!(session.is_letter_complete());

    session.select_index(2).unwrap();
    let selected = session.current_letter();
    session.tick(5.0);
    assert_eq!(session.current_letter(), selected);
    assert!(session
        .drain_events()
        .iter()
        .any(|ev| matches!(ev, SessionEvent::LetterLoaded { index: 2, .. })));
}

#[test]
fn far_away_glyph_is_rejected_before_a_session_starts() {
    let json = r#"{"letters":[{"character":"b","glyph":{"x":20000000,"baseline":300,"width":80,"height":160}}]}"#;
    assert!(matches!(
        LetterCatalog::from_json(json),
        Err(CatalogError::CoordinateOutOfRange { letter: 'b', .. })
    ));
}

#[test]
fn huge_stamp_radius_is_rejected_and_max_radius_runs() {
    assert!(matches!(
        TracerConfig::from_json(r#"{"coverage":{"stamp_radius":50000}}"#),
        Err(ConfigError::OutOfRange { field: "coverage.stamp_radius", .. })
    ));

    let config = TracerConfig::from_json(r#"{"coverage":{"stamp_radius":64}}"#).unwrap();
    let mut session = TracingSession::new(LetterCatalog::builtin(), config).unwrap();
    session.select('b').unwrap();
    session.pointer_down(Vec2::new(200.0, 200.0)).unwrap();
    session.pointer_move(Vec2::new(210.0, 220.0)).unwrap();
    assert!(session.progress() > 0.0);
}
