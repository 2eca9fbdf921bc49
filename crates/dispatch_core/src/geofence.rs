//! Campus boundary geofencing.
//!
//! Classifies coordinates as on- or off-campus with a ray cast over the
//! boundary ring. Points that hit a vertex or lie on a horizontal edge
//! count as inside. The ring is loaded once at startup and never mutated,
//! so queries are freely concurrent.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::geo::Coordinate;

/// Packaged campus boundary ring (GeoJSON), so the classifier works
/// without external GIS data.
const BUNDLED_BOUNDARY: &str = include_str!("../data/campus_boundary.geojson");

/// A boundary vertex in (x = longitude, y = latitude) order, matching the
/// GeoJSON coordinate convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Vertex {
    x: f64,
    y: f64,
}

/// Errors loading boundary data.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("boundary data is not valid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("boundary data contains no polygon ring")]
    NoRing,
    #[error("boundary ring needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
}

#[derive(Debug, Deserialize)]
struct BoundaryFile {
    #[serde(default)]
    features: Vec<BoundaryFeature>,
}

#[derive(Debug, Deserialize)]
struct BoundaryFeature {
    geometry: BoundaryGeometry,
}

#[derive(Debug, Deserialize)]
struct BoundaryGeometry {
    #[serde(rename = "type")]
    kind: String,
    /// Polygon rings of `[lng, lat]` positions; the first ring is the
    /// outer boundary.
    #[serde(default)]
    coordinates: Vec<Vec<[f64; 2]>>,
}

/// A simple (non-self-intersecting) closed ring enclosing campus.
///
/// The ring must have at least 3 vertices; behavior on degenerate rings
/// is unspecified. The first vertex is not repeated at the end.
#[derive(Debug, Clone)]
pub struct CampusBoundary {
    ring: Vec<Vertex>,
}

impl CampusBoundary {
    /// Build a boundary from `(longitude, latitude)` vertices in ring
    /// order. A trailing vertex equal to the first is dropped.
    pub fn from_vertices(vertices: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut ring: Vec<Vertex> = vertices
            .into_iter()
            .map(|(x, y)| Vertex { x, y })
            .collect();
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        debug_assert!(ring.len() >= 3, "boundary ring needs at least 3 vertices");
        Self { ring }
    }

    /// Parse a GeoJSON `FeatureCollection` and take the outer ring of its
    /// first polygon feature.
    pub fn from_geojson_str(geojson: &str) -> Result<Self, BoundaryError> {
        let file: BoundaryFile = serde_json::from_str(geojson)?;
        let ring = file
            .features
            .iter()
            .filter(|feature| feature.geometry.kind == "Polygon")
            .find_map(|feature| feature.geometry.coordinates.first())
            .ok_or(BoundaryError::NoRing)?;

        let mut vertices: Vec<(f64, f64)> =
            ring.iter().map(|&[x, y]| (x, y)).collect();
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(BoundaryError::TooFewVertices(vertices.len()));
        }
        debug!(vertices = vertices.len(), "loaded campus boundary ring");
        Ok(Self::from_vertices(vertices))
    }

    /// The boundary shipped with the crate.
    ///
    /// # Panics
    ///
    /// Panics if the packaged boundary file is invalid (should never
    /// happen).
    pub fn bundled() -> Self {
        Self::from_geojson_str(BUNDLED_BOUNDARY)
            .expect("packaged campus boundary must be a valid polygon")
    }

    /// Number of vertices in the ring.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Whether `point` lies inside or on the boundary of the ring.
    pub fn contains(&self, point: Coordinate) -> bool {
        self.point_in_ring(point.longitude, point.latitude)
    }

    /// Ray cast with explicit boundary handling, in (x = lng, y = lat)
    /// space. Vertex hits and points on horizontal edges short-circuit to
    /// inside before any crossings are counted.
    fn point_in_ring(&self, x: f64, y: f64) -> bool {
        if self.ring.iter().any(|v| v.x == x && v.y == y) {
            return true;
        }

        for (p1, p2) in self.edges() {
            if p1.y == p2.y && p1.y == y && x > p1.x.min(p2.x) && x < p1.x.max(p2.x) {
                return true;
            }
        }

        // Count edges crossed by a ray from the point; an odd count means
        // the point is inside.
        let mut inside = false;
        for (p1, p2) in self.edges() {
            if y > p1.y.min(p2.y) && y <= p1.y.max(p2.y) && x <= p1.x.max(p2.x) {
                if p1.x == p2.x {
                    inside = !inside;
                } else {
                    // The window above excludes horizontal edges, so the
                    // slope below is finite.
                    let x_intersection = (y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
                    if x <= x_intersection {
                        inside = !inside;
                    }
                }
            }
        }
        inside
    }

    /// Consecutive edges in ring order, including the wraparound edge from
    /// the last vertex back to the first.
    fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        let n = self.ring.len();
        (0..n).map(move |i| (self.ring[i], self.ring[(i + 1) % n]))
    }
}
