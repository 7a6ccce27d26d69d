//! Marching-squares triangulation of the wall mass of a tile grid.
//!
//! Tile centres are the control points. Every 2x2 block of tiles forms a
//! square whose four wall bits select a polygon over eight canonical points:
//!
//! ```text
//!   6 --- 5 --- 4        tl --- tr
//!   |           |         |      |
//!   7           3         |      |
//!   |           |         |      |
//!   0 --- 1 --- 2        bl --- br
//! ```
//!
//! Polygons are counter-clockwise in the xz plane and are fanned into
//! triangles from their first point.

use cavern_map::{Tile, TileGrid};
use glam::Vec3;

use crate::mesh_data::MeshData;

const BOTTOM_LEFT: usize = 0;
const BOTTOM: usize = 1;
const BOTTOM_RIGHT: usize = 2;
const RIGHT: usize = 3;
const TOP_RIGHT: usize = 4;
const TOP: usize = 5;
const TOP_LEFT: usize = 6;
const LEFT: usize = 7;

/// Offset of each canonical point inside its square, in cells.
const POINT_OFFSETS: [(f32, f32); 8] = [
    (0.0, 0.0),
    (0.5, 0.0),
    (1.0, 0.0),
    (1.0, 0.5),
    (1.0, 1.0),
    (0.5, 1.0),
    (0.0, 1.0),
    (0.0, 0.5),
];

/// Largest polygon in [`CONFIGURATIONS`].
const MAX_POLYGON_POINTS: usize = 6;

/// Polygon for each configuration. Bits: bl = 1, br = 2, tr = 4, tl = 8.
/// The saddles (5 and 10) join their two walls across the square.
pub const CONFIGURATIONS: [&[usize]; 16] = [
    &[],
    &[0, 1, 7],
    &[2, 3, 1],
    &[0, 2, 3, 7],
    &[4, 5, 3],
    &[0, 1, 3, 4, 5, 7],
    &[2, 4, 5, 1],
    &[0, 2, 4, 5, 7],
    &[6, 7, 5],
    &[6, 0, 1, 5],
    &[2, 3, 5, 6, 7, 1],
    &[6, 0, 2, 3, 5],
    &[4, 6, 7, 3],
    &[4, 6, 0, 1, 3],
    &[2, 4, 6, 7, 1],
    &[0, 2, 4, 6],
];

/// Vertex ids a square assigned to its eight points.
type SquareVertices = [Option<u32>; 8];

/// Placement of the mesh in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshSettings {
    /// World size of one tile.
    pub cell_size: f32,
    /// World position of tile (0, 0).
    pub origin: Vec3,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            origin: Vec3::ZERO,
        }
    }
}

impl MeshSettings {
    fn position(&self, x: usize, y: usize, point: usize) -> Vec3 {
        let (dx, dy) = POINT_OFFSETS[point];
        self.origin
            + Vec3::new(
                (x as f32 + dx) * self.cell_size,
                0.0,
                (y as f32 + dy) * self.cell_size,
            )
    }
}

/// Wall configuration of the square whose bottom-left tile is `(x, y)`.
pub fn configuration(grid: &TileGrid, x: i32, y: i32) -> u8 {
    let corners = [(x, y, 1), (x + 1, y, 2), (x + 1, y + 1, 4), (x, y + 1, 8)];
    corners
        .iter()
        .filter(|&&(cx, cy, _)| grid.is(cx, cy, Tile::Wall))
        .fold(0, |config, &(_, _, bit)| config | bit)
}

/// Triangulates the walls of `grid`.
///
/// A `length x width` grid has `(length - 1) x (width - 1)` squares; grids
/// thinner than two tiles yield an empty mesh. Points on the bottom and left
/// edges of a square reuse the vertices already created by the square below
/// or to the left, so each position is emitted once. Only the previous and
/// the current row of squares are cached.
pub fn triangulate(grid: &TileGrid, settings: &MeshSettings) -> MeshData {
    let mut mesh = MeshData::new();
    if grid.length() < 2 || grid.width() < 2 {
        return mesh;
    }

    let squares_x = grid.length() - 1;
    let mut below: Vec<SquareVertices> = vec![[None; 8]; squares_x];
    let mut row: Vec<SquareVertices> = vec![[None; 8]; squares_x];

    for y in 0..grid.width() - 1 {
        for x in 0..squares_x {
            let points = CONFIGURATIONS[configuration(grid, x as i32, y as i32) as usize];
            if points.is_empty() {
                continue;
            }

            let mut ids: SquareVertices = [None; 8];
            let mut fan = [0u32; MAX_POLYGON_POINTS];
            for (slot, &point) in fan.iter_mut().zip(points) {
                let id = shared_vertex(point, x, &below, &row)
                    .unwrap_or_else(|| mesh.push_vertex(settings.position(x, y, point)));
                ids[point] = Some(id);
                *slot = id;
            }

            let fan = &fan[..points.len()];
            for pair in fan[1..].windows(2) {
                mesh.push_triangle(fan[0], pair[0], pair[1]);
            }
            row[x] = ids;
        }
        std::mem::swap(&mut below, &mut row);
        row.fill([None; 8]);
    }

    tracing::debug!(
        "triangulated {}x{} grid: {} vertices, {} triangles",
        grid.length(),
        grid.width(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    mesh
}

/// Vertex a neighbouring square already created at `point`, if any.
fn shared_vertex(
    point: usize,
    x: usize,
    below: &[SquareVertices],
    row: &[SquareVertices],
) -> Option<u32> {
    let left = |p: usize| x.checked_sub(1).and_then(|lx| row[lx][p]);
    match point {
        BOTTOM_LEFT => below[x][TOP_LEFT].or_else(|| left(BOTTOM_RIGHT)),
        BOTTOM => below[x][TOP],
        BOTTOM_RIGHT => below[x][TOP_RIGHT],
        LEFT => left(RIGHT),
        TOP_LEFT => left(TOP_RIGHT),
        _ => None,
    }
}
