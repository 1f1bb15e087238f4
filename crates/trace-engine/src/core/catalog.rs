//! Letter definitions and the immutable catalog they live in.
//!
//! A catalog entry is either *guided* (ordered strokes of ordered guide
//! points) or *coverage* (a glyph region whose pixels have to be painted).

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::CatalogError;
use crate::core::geometry::Point;

/// Guide path for one continuous pen motion. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    pub fn first(&self) -> Point {
        self.points[0]
    }

    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: strokes are validated on construction.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A guided letter: an identifier plus its strokes in tracing order.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterDefinition {
    id: char,
    strokes: Vec<Stroke>,
}

impl LetterDefinition {
    /// Build a definition, rejecting letters without strokes and strokes
    /// without points.
    pub fn new(id: char, strokes: Vec<Vec<Point>>) -> Result<Self, CatalogError> {
        if strokes.is_empty() {
            return Err(CatalogError::NoStrokes { letter: id });
        }
        if let Some(stroke) = strokes.iter().position(|s| s.is_empty()) {
            return Err(CatalogError::EmptyStroke { letter: id, stroke });
        }
        for p in strokes.iter().flatten() {
            check_coordinate(id, p.x)?;
            check_coordinate(id, p.y)?;
        }
        Ok(Self {
            id,
            strokes: strokes.into_iter().map(|points| Stroke { points }).collect(),
        })
    }

    pub fn id(&self) -> char {
        self.id
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stroke(&self, index: usize) -> Option<&Stroke> {
        self.strokes.get(index)
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Number of guide points across every stroke.
    pub fn total_points(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }
}

/// Nominal placement of a rendered glyph, used to estimate the pixels a
/// coverage letter is made of.
///
/// The estimate is the bounding rectangle `x ± width/2` horizontally and
/// `baseline - height .. baseline + height/4` vertically. It over-counts
/// thin glyphs and misses flourishes outside the box; that is the accepted
/// approximation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphRegion {
    /// Horizontal centre of the glyph.
    pub x: f32,
    /// Text baseline.
    pub baseline: f32,
    pub width: f32,
    pub height: f32,
}

impl GlyphRegion {
    /// Top-left and bottom-right corners of the estimated region.
    pub fn bounds(&self) -> (Point, Point) {
        (
            Vec2::new(self.x - self.width / 2.0, self.baseline - self.height),
            Vec2::new(self.x + self.width / 2.0, self.baseline + self.height / 4.0),
        )
    }

    /// Quantized cells inside the estimated region.
    ///
    /// Samples the box at unit steps from its top-left corner and rounds each
    /// sample to a cell.
    pub fn cells(&self) -> HashSet<(i32, i32)> {
        let (min, max) = self.bounds();
        let columns = (max.x - min.x).ceil().max(0.0) as i32;
        let rows = (max.y - min.y).ceil().max(0.0) as i32;
        let mut cells = HashSet::with_capacity((columns.max(0) * rows.max(0)) as usize);
        for i in 0..columns {
            let x = round_half_up(min.x + i as f32);
            for j in 0..rows {
                cells.insert((x, round_half_up(min.y + j as f32)));
            }
        }
        cells
    }
}

/// Largest absolute coordinate accepted in letter data, in canvas units.
pub const MAX_COORDINATE: f32 = 10_000.0;

/// Largest glyph region width or height, in canvas units.
pub const MAX_GLYPH_EXTENT: f32 = 1_000.0;

fn check_coordinate(letter: char, value: f32) -> Result<(), CatalogError> {
    if value.is_finite() && value.abs() <= MAX_COORDINATE {
        Ok(())
    } else {
        Err(CatalogError::CoordinateOutOfRange { letter, value })
    }
}

/// Round to the nearest integer, with halves going towards +∞.
pub(crate) fn round_half_up(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

/// A letter completed by painting over its glyph region.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageLetter {
    id: char,
    region: GlyphRegion,
}

impl CoverageLetter {
    pub fn new(id: char, region: GlyphRegion) -> Result<Self, CatalogError> {
        let valid = |v: f32| v.is_finite() && v > 0.0 && v <= MAX_GLYPH_EXTENT;
        if !valid(region.width) || !valid(region.height) {
            return Err(CatalogError::InvalidGlyph { letter: id });
        }
        check_coordinate(id, region.x)?;
        check_coordinate(id, region.baseline)?;
        Ok(Self { id, region })
    }

    pub fn id(&self) -> char {
        self.id
    }

    pub fn region(&self) -> &GlyphRegion {
        &self.region
    }
}

/// One selectable letter.
#[derive(Debug, Clone, PartialEq)]
pub enum LetterEntry {
    Guided(LetterDefinition),
    Coverage(CoverageLetter),
}

impl LetterEntry {
    pub fn id(&self) -> char {
        match self {
            Self::Guided(letter) => letter.id(),
            Self::Coverage(letter) => letter.id(),
        }
    }
}

/// Raw catalog as stored in JSON.
#[derive(Debug, Deserialize)]
struct RawCatalog {
    letters: Vec<RawLetter>,
}

#[derive(Debug, Deserialize)]
struct RawLetter {
    character: char,
    #[serde(default)]
    strokes: Vec<Vec<[f32; 2]>>,
    #[serde(default)]
    glyph: Option<GlyphRegion>,
}

impl RawLetter {
    fn into_entry(self) -> Result<LetterEntry, CatalogError> {
        match (self.strokes.is_empty(), self.glyph) {
            (false, Some(_)) => Err(CatalogError::AmbiguousLetter {
                letter: self.character,
            }),
            (true, Some(region)) => Ok(LetterEntry::Coverage(CoverageLetter::new(
                self.character,
                region,
            )?)),
            (_, None) => {
                let strokes = self
                    .strokes
                    .into_iter()
                    .map(|stroke| stroke.into_iter().map(Vec2::from).collect())
                    .collect();
                Ok(LetterEntry::Guided(LetterDefinition::new(self.character, strokes)?))
            }
        }
    }
}

/// Immutable, ordered table of letters. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterCatalog {
    entries: Vec<LetterEntry>,
}

impl LetterCatalog {
    /// Build a catalog, rejecting empty tables and repeated identifiers.
    pub fn new(entries: Vec<LetterEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id()) {
                return Err(CatalogError::DuplicateLetter { letter: entry.id() });
            }
        }
        Ok(Self { entries })
    }

    /// Parse a catalog from JSON:
    ///
    /// ```json
    /// { "letters": [
    ///     { "character": "L", "strokes": [[[100, 50], [100, 350]], [[100, 350], [300, 350]]] },
    ///     { "character": "b", "glyph": { "x": 200, "baseline": 300, "width": 120, "height": 240 } }
    /// ] }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        let entries = raw
            .letters
            .into_iter()
            .map(RawLetter::into_entry)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    /// The letters shipped with the tracer.
    pub fn builtin() -> Self {
        let mut entries: Vec<LetterEntry> = BUILTIN_GUIDED
            .iter()
            .map(|(id, strokes)| {
                LetterEntry::Guided(LetterDefinition {
                    id: *id,
                    strokes: strokes
                        .iter()
                        .map(|points| Stroke {
                            points: points.iter().copied().map(Vec2::from).collect(),
                        })
                        .collect(),
                })
            })
            .collect();
        entries.push(LetterEntry::Coverage(CoverageLetter {
            id: 'b',
            region: BUILTIN_COVERAGE_B,
        }));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: catalogs are validated on construction.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LetterEntry> {
        self.entries.get(index)
    }

    pub fn index_of(&self, id: char) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == id)
    }

    /// Index after `index`, wrapping to the start.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.entries.len()
    }

    /// Index before `index`, wrapping to the end.
    pub fn previous_index(&self, index: usize) -> usize {
        (index + self.entries.len() - 1) % self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LetterEntry> {
        self.entries.iter()
    }

    /// Identifiers in catalog order.
    pub fn ids(&self) -> Vec<char> {
        self.entries.iter().map(LetterEntry::id).collect()
    }
}

type BuiltinStrokes = &'static [&'static [[f32; 2]]];

const BUILTIN_GUIDED: &[(char, BuiltinStrokes)] = &[
    (
        'A',
        &[
            &[[200.0, 50.0], [175.0, 125.0], [150.0, 200.0], [125.0, 275.0], [100.0, 350.0]],
            &[[200.0, 50.0], [225.0, 125.0], [250.0, 200.0], [275.0, 275.0], [300.0, 350.0]],
            &[[130.0, 200.0], [165.0, 200.0], [200.0, 200.0], [235.0, 200.0], [270.0, 200.0]],
        ],
    ),
    (
        'B',
        &[
            &[[100.0, 50.0], [100.0, 110.0], [100.0, 170.0], [100.0, 230.0], [100.0, 290.0], [100.0, 350.0]],
            &[
                [100.0, 50.0], [160.0, 50.0], [210.0, 60.0], [240.0, 90.0],
                [240.0, 130.0], [210.0, 160.0], [160.0, 170.0], [100.0, 170.0],
            ],
            &[
                [100.0, 170.0], [170.0, 170.0], [230.0, 190.0], [260.0, 230.0],
                [260.0, 280.0], [230.0, 320.0], [170.0, 350.0], [100.0, 350.0],
            ],
        ],
    ),
    (
        'a',
        &[
            &[
                [250.0, 180.0], [235.0, 160.0], [215.0, 148.0], [190.0, 150.0],
                [170.0, 165.0], [150.0, 190.0], [140.0, 220.0], [135.0, 250.0],
                [145.0, 280.0], [170.0, 305.0], [200.0, 315.0], [230.0, 305.0],
                [255.0, 280.0], [268.0, 250.0], [265.0, 215.0], [250.0, 180.0],
            ],
            &[[268.0, 170.0], [268.0, 200.0], [268.0, 230.0], [268.0, 260.0], [270.0, 290.0], [275.0, 315.0]],
        ],
    ),
    (
        'L',
        &[
            &[[100.0, 50.0], [100.0, 110.0], [100.0, 170.0], [100.0, 230.0], [100.0, 290.0], [100.0, 350.0]],
            &[[100.0, 350.0], [150.0, 350.0], [200.0, 350.0], [250.0, 350.0], [300.0, 350.0]],
        ],
    ),
];

const BUILTIN_COVERAGE_B: GlyphRegion = GlyphRegion {
    x: 200.0,
    baseline: 300.0,
    width: 120.0,
    height: 240.0,
};
