use glam::Vec2;
use serde::Serialize;

use crate::core::catalog::LetterDefinition;
use crate::core::geometry::Point;
use crate::render::style::{Color, RenderStyle};
use crate::trace::engine::TraceEngine;
use crate::trace::tracker::{CoverageTracer, Tracker};

/// One primitive for the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Open polyline with round caps and joins.
    Polyline {
        points: Vec<Point>,
        width: f32,
        color: Color,
    },
    /// Filled circle.
    Dot { center: Point, radius: f32, color: Color },
    /// Filled axis-aligned rectangle.
    Rect { min: Point, max: Point, color: Color },
}

/// Stroke-order number drawn on a guide dot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideLabel {
    pub text: String,
    pub x: f32,
    pub y: f32,
    /// Font size in canvas units.
    pub size: f32,
}

/// Ordered draw commands, back to front, plus text labels for the UI layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    labels: Vec<GuideLabel>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn labels(&self) -> &[GuideLabel] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn labels_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.labels)
    }

    /// A single point becomes a dot of the same width.
    fn polyline(&mut self, points: &[Point], width: f32, color: Color) {
        match points {
            [] => {}
            [p] => self.dot(*p, width / 2.0, color),
            _ => self.commands.push(DrawCommand::Polyline {
                points: points.to_vec(),
                width,
                color,
            }),
        }
    }

    fn line(&mut self, from: Point, to: Point, width: f32, color: Color) {
        self.commands.push(DrawCommand::Polyline {
            points: vec![from, to],
            width,
            color,
        });
    }

    fn dot(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Dot { center, radius, color });
    }
}

/// Build the scene for the current tracker state. Pure: the same tracker
/// state always gives the same list.
pub fn build_draw_list(tracker: &Tracker, style: &RenderStyle, width: f32, height: f32) -> DrawList {
    let mut list = DrawList::new();
    draw_grid(&mut list, style, width, height);
    match tracker {
        Tracker::Guided(engine) => draw_guided(&mut list, engine, style),
        Tracker::Coverage(tracer) => draw_coverage(&mut list, tracer, style),
    }
    list
}

/// Ruled notebook paper: fine grid, darker rulings, red margin.
fn draw_grid(list: &mut DrawList, style: &RenderStyle, width: f32, height: f32) {
    let step = style.grid_size;
    if step <= 0.0 {
        return;
    }

    let mut x = 0.0;
    while x <= width {
        list.line(Vec2::new(x, 0.0), Vec2::new(x, height), style.grid_light_width, style.grid_light);
        x += step;
    }
    let mut y = 0.0;
    while y <= height {
        list.line(Vec2::new(0.0, y), Vec2::new(width, y), style.grid_light_width, style.grid_light);
        y += step;
    }

    let dark_step = step * style.grid_dark_every as f32;
    if dark_step > 0.0 {
        let mut y = dark_step;
        while y <= height {
            list.line(Vec2::new(0.0, y), Vec2::new(width, y), 1.0, style.grid_dark);
            y += dark_step;
        }
    }

    let margin_x = step * style.margin_cells as f32;
    list.line(Vec2::new(margin_x, 0.0), Vec2::new(margin_x, height), 1.0, style.margin);
}

fn draw_letter(list: &mut DrawList, letter: &LetterDefinition, width: f32, color: Color) {
    for stroke in letter.strokes() {
        list.polyline(stroke.points(), width, color);
    }
}

fn draw_guided(list: &mut DrawList, engine: &TraceEngine, style: &RenderStyle) {
    let letter = engine.letter();
    let state = engine.state();

    if state.is_letter_complete {
        draw_letter(list, letter, style.outline_width, style.final_letter);
        return;
    }

    draw_letter(list, letter, style.outline_width, style.outline);

    let Some(stroke) = letter.stroke(state.current_stroke) else {
        return;
    };

    let (dash, gap) = style.dash_pattern;
    for piece in dash_polyline(stroke.points(), dash, gap) {
        list.polyline(&piece, style.guide_dash_width, style.guide_dash);
    }

    let traced_width = style.outline_width * style.traced_scale;
    for segment in &state.completed_segments {
        list.line(segment.from, segment.to, traced_width, style.traced);
    }

    if state.is_drawing {
        list.polyline(&state.live_points, style.live_width, style.live);
    }

    let last = stroke.len() - 1;
    for (index, &point) in stroke.points().iter().enumerate() {
        let active = index == state.next_point;
        let radius = match (active, state.next_point) {
            (true, 0) => style.dot_first_radius,
            (true, _) => style.dot_active_radius,
            (false, _) => style.dot_radius,
        };
        let color = if active {
            style.dot_active
        } else if index < state.next_point {
            style.dot_passed
        } else {
            style.dot
        };
        list.dot(point, radius, color);

        let number = if index == 0 {
            Some(state.current_stroke * 2 + 1)
        } else if index == last {
            Some(state.current_stroke * 2 + 2)
        } else {
            None
        };
        if let Some(number) = number {
            list.labels.push(GuideLabel {
                text: number.to_string(),
                x: point.x,
                y: point.y,
                size: (radius * 0.7).max(style.label_min_size),
            });
        }
    }
}

fn draw_coverage(list: &mut DrawList, tracer: &CoverageTracer, style: &RenderStyle) {
    let (min, max) = tracer.letter().region().bounds();
    list.commands.push(DrawCommand::Rect {
        min,
        max,
        color: style.glyph_tint,
    });

    let width = (tracer.estimator().stamp_radius() as f32 * 2.0).max(2.0);
    for line in tracer.trail() {
        list.polyline(line, width, style.trail);
    }
}

/// Split a polyline into dash pieces of length `dash` separated by `gap`,
/// measured along the path.
pub fn dash_polyline(points: &[Point], dash: f32, gap: f32) -> Vec<Vec<Point>> {
    if points.len() < 2 || dash <= 0.0 {
        return Vec::new();
    }
    if gap <= 0.0 {
        return vec![points.to_vec()];
    }

    let mut dashes = Vec::new();
    let mut on = true;
    let mut left = dash;
    let mut current = vec![points[0]];

    for pair in points.windows(2) {
        let (mut a, b) = (pair[0], pair[1]);
        let mut remaining = a.distance(b);
        while remaining > 0.0 {
            let step = left.min(remaining);
            // Too long for f32 to resolve a dash step; skip the rest of it.
            if remaining - step >= remaining {
                break;
            }
            let p = a + (b - a) * (step / remaining);
            if on {
                current.push(p);
            }
            remaining -= step;
            left -= step;
            a = p;

            if left <= 0.0 {
                if on {
                    dashes.push(std::mem::take(&mut current));
                } else {
                    current.push(a);
                }
                on = !on;
                left = if on { dash } else { gap };
            }
        }
    }

    if on && current.len() >= 2 {
        dashes.push(current);
    }
    dashes
}
