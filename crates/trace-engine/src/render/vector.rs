//! CPU-side tessellation of a [`DrawList`] with lyon.
//!
//! Produces a flat triangle list the JS side uploads as-is.

use bytemuck::{Pod, Zeroable};
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor, LineCap,
    LineJoin, StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor,
    VertexBuffers,
};

use crate::core::geometry::Point;
use crate::render::scene::{DrawCommand, DrawList};
use crate::render::style::Color;

/// Per-vertex data: position + RGBA.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn at(x: f32, y: f32, color: Color) -> Self {
        Self {
            x,
            y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

struct FillVertexCtor {
    color: Color,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex::at(vertex.position().x, vertex.position().y, self.color)
    }
}

struct StrokeVertexCtor {
    color: Color,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex::at(vertex.position().x, vertex.position().y, self.color)
    }
}

/// Lyon tessellators plus the output vertex buffer, reused between frames.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    vertices: Vec<VectorVertex>,
}

impl VectorState {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(16384),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[VectorVertex] {
        &self.vertices
    }

    /// Vertices as flat floats (x, y, r, g, b, a, ...).
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.as_floats().as_ptr()
    }

    /// Replace the buffer with the tessellation of `list`.
    pub fn tessellate(&mut self, list: &DrawList) {
        self.clear();
        for command in list.commands() {
            match command {
                DrawCommand::Polyline { points, width, color } => {
                    self.stroke_polyline(points, *width, *color)
                }
                DrawCommand::Dot { center, radius, color } => {
                    self.fill_circle(*center, *radius, *color)
                }
                DrawCommand::Rect { min, max, color } => self.fill_rect(*min, *max, *color),
            }
        }
    }

    /// Expand indexed geometry into the triangle list.
    fn flush_geometry(&mut self) {
        let VertexBuffers { vertices, indices } = &mut self.geometry;
        self.vertices
            .extend(indices.iter().map(|&idx| vertices[idx as usize]));
        vertices.clear();
        indices.clear();
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        self.fill_path(&builder.build(), color);
    }

    fn fill_rect(&mut self, min: Point, max: Point, color: Color) {
        if max.x <= min.x || max.y <= min.y {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(min.x, min.y));
        builder.line_to(point(max.x, min.y));
        builder.line_to(point(max.x, max.y));
        builder.line_to(point(min.x, max.y));
        builder.close();
        self.fill_path(&builder.build(), color);
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(err) => {
                log::warn!("fill tessellation failed: {:?}", err);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }

    /// Open polyline with round caps and joins.
    fn stroke_polyline(&mut self, points: &[Point], width: f32, color: Color) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.is_empty() || width <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(first.x, first.y));
        for p in rest {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(false);

        let options = StrokeOptions::tolerance(0.5)
            .with_line_width(width)
            .with_line_cap(LineCap::Round)
            .with_line_join(LineJoin::Round);
        let result = self.stroke_tess.tessellate_path(
            &builder.build(),
            &options,
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(err) => {
                log::warn!("stroke tessellation failed: {:?}", err);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::TracerConfig;
    use crate::core::catalog::LetterCatalog;
    use crate::render::scene::build_draw_list;
    use crate::render::style::RenderStyle;
    use crate::trace::tracker::Tracker;
    use std::mem::size_of;

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn rect_is_two_triangles() {
        let mut state = VectorState::new();
        state.fill_rect(Point::ZERO, Point::new(100.0, 50.0), Color::BLACK);
        assert_eq!(state.vertex_count(), 6);
        assert_eq!(state.as_floats().len(), 36);
    }

    #[test]
    fn stroke_and_dot_produce_triangles() {
        let mut state = VectorState::new();
        state.stroke_polyline(&[Point::ZERO, Point::new(100.0, 100.0)], 5.0, Color::BLACK);
        let after_line = state.vertex_count();
        assert!(after_line > 0);
        assert_eq!(after_line % 3, 0);

        state.fill_circle(Point::new(50.0, 50.0), 7.0, Color::BLACK);
        assert!(state.vertex_count() > after_line);
    }

    #[test]
    fn degenerate_shapes_produce_nothing() {
        let mut state = VectorState::new();
        state.stroke_polyline(&[], 5.0, Color::BLACK);
        state.stroke_polyline(&[Point::ZERO], 5.0, Color::BLACK);
        state.fill_circle(Point::ZERO, 0.0, Color::BLACK);
        state.fill_rect(Point::ONE, Point::ZERO, Color::BLACK);
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn tessellate_replaces_previous_frame() {
        let catalog = LetterCatalog::builtin();
        let entry = catalog.get(0).unwrap();
        let tracker = Tracker::for_entry(entry, &TracerConfig::default()).unwrap();
        let list = build_draw_list(&tracker, &RenderStyle::default(), 400.0, 400.0);

        let mut state = VectorState::new();
        state.tessellate(&list);
        let first = state.vertex_count();
        assert!(first > 0);
        state.tessellate(&list);
        assert_eq!(state.vertex_count(), first);
    }
}
