//! Boundary loops of a triangulated wall mesh.

use glam::Vec3;

use crate::mesh_data::MeshData;

/// Vertices with more incident triangles than this are interior or pinched
/// and never start a walk.
const MAX_START_TRIANGLES: usize = 3;

/// A closed loop of vertex indices along the mesh boundary.
///
/// The first index is repeated at the end. Walking the loop keeps the mesh
/// on the left in the xz plane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outline {
    pub vertices: Vec<u32>,
}

impl Outline {
    pub fn is_closed(&self) -> bool {
        self.vertices.len() > 1 && self.vertices.first() == self.vertices.last()
    }

    /// Consecutive vertex pairs, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.vertices.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Number of distinct vertices on the loop.
    pub fn len(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns `true` if `c` lies strictly left of the directed line `a → b`,
/// looking down the y axis onto the xz plane.
pub fn is_left_of(a: Vec3, b: Vec3, c: Vec3) -> bool {
    (b.x - a.x) * (c.z - a.z) - (b.z - a.z) * (c.x - a.x) > 0.0
}

/// Vertex → triangle adjacency in compressed rows.
struct TriangleIndex {
    offsets: Vec<usize>,
    triangles: Vec<u32>,
}

impl TriangleIndex {
    fn build(mesh: &MeshData) -> Self {
        let mut offsets = vec![0; mesh.vertex_count() + 1];
        for &v in &mesh.triangles {
            offsets[v as usize + 1] += 1;
        }
        for i in 1..offsets.len() {
            offsets[i] += offsets[i - 1];
        }
        let mut cursor = offsets.clone();
        let mut triangles = vec![0; mesh.triangles.len()];
        for (t, tri) in mesh.triangle_indices().enumerate() {
            for v in tri {
                triangles[cursor[v as usize]] = t as u32;
                cursor[v as usize] += 1;
            }
        }
        Self { offsets, triangles }
    }

    fn of(&self, vertex: u32) -> &[u32] {
        let v = vertex as usize;
        &self.triangles[self.offsets[v]..self.offsets[v + 1]]
    }
}

/// Extracts every boundary loop of `mesh`.
///
/// A boundary edge belongs to exactly one triangle. Walks start from
/// unvisited vertices with at most three incident triangles and follow
/// boundary edges whose triangle lies to the left of the step, until no
/// unvisited neighbour remains. The loop is then closed back to its start.
pub fn extract_outlines(mesh: &MeshData) -> Vec<Outline> {
    let index = TriangleIndex::build(mesh);
    let mut visited = vec![false; mesh.vertex_count()];
    let mut outlines = Vec::new();

    for start in 0..mesh.vertex_count() as u32 {
        if visited[start as usize] || index.of(start).len() > MAX_START_TRIANGLES {
            continue;
        }
        let Some(mut next) = next_boundary_vertex(mesh, &index, &visited, start) else {
            continue;
        };

        visited[start as usize] = true;
        let mut loop_vertices = vec![start];
        loop {
            visited[next as usize] = true;
            loop_vertices.push(next);
            match next_boundary_vertex(mesh, &index, &visited, next) {
                Some(v) => next = v,
                None => break,
            }
        }
        loop_vertices.push(start);
        outlines.push(Outline {
            vertices: loop_vertices,
        });
    }

    tracing::debug!("extracted {} outlines", outlines.len());
    outlines
}

/// Unvisited neighbour of `vertex` across a boundary edge whose triangle is
/// on the left of the step.
fn next_boundary_vertex(mesh: &MeshData, index: &TriangleIndex, visited: &[bool], vertex: u32) -> Option<u32> {
    for &t in index.of(vertex) {
        let tri = triangle(mesh, t);
        for &candidate in &tri {
            if candidate == vertex || visited[candidate as usize] {
                continue;
            }
            let Some(third) = sole_triangle_third(mesh, index, vertex, candidate) else {
                continue;
            };
            let position = |v: u32| mesh.vertices[v as usize];
            if is_left_of(position(vertex), position(candidate), position(third)) {
                return Some(candidate);
            }
        }
    }
    None
}

/// If edge `a-b` belongs to exactly one triangle, that triangle's third vertex.
fn sole_triangle_third(mesh: &MeshData, index: &TriangleIndex, a: u32, b: u32) -> Option<u32> {
    let mut shared = index
        .of(a)
        .iter()
        .filter(|&&t| index.of(b).contains(&t))
        .map(|&t| triangle(mesh, t));
    let only = shared.next()?;
    if shared.next().is_some() {
        return None;
    }
    only.into_iter().find(|&v| v != a && v != b)
}

fn triangle(mesh: &MeshData, t: u32) -> [u32; 3] {
    let base = t as usize * 3;
    [mesh.triangles[base], mesh.triangles[base + 1], mesh.triangles[base + 2]]
}

/// Number of triangles containing both `a` and `b`.
pub fn shared_triangle_count(mesh: &MeshData, a: u32, b: u32) -> usize {
    mesh.triangle_indices()
        .filter(|tri| tri.contains(&a) && tri.contains(&b))
        .count()
}
