//! Indexed triangle mesh produced by the triangulator and wall extrusion.

use glam::{Vec2, Vec3};

/// Vertex positions, triangle indices and optional texture coordinates.
///
/// Positions are shared between triangles; `triangles` holds three indices
/// per triangle. `uvs` is either empty or has one entry per vertex.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<u32>,
    pub uvs: Vec<Vec2>,
}

impl MeshData {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, position: Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        debug_assert!([a, b, c].iter().all(|&i| (i as usize) < self.vertices.len()));
        self.triangles.extend_from_slice(&[a, b, c]);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Iterates triangles as index triples.
    pub fn triangle_indices(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.triangles.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Appends `other`, offsetting its indices past this mesh's vertices.
    ///
    /// UVs are kept only if both meshes carry them.
    pub fn append(&mut self, other: &MeshData) {
        let has_uvs = self.uvs.len() == self.vertices.len() && other.uvs.len() == other.vertices.len();
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles.extend(other.triangles.iter().map(|&i| i + base));
        if has_uvs {
            self.uvs.extend_from_slice(&other.uvs);
        } else {
            self.uvs.clear();
        }
    }

    /// Assigns planar texture coordinates from the xz position.
    ///
    /// The mesh's xz bounding box maps onto `[0, tiling]` on both axes. A
    /// degenerate axis maps to zero.
    pub fn project_uvs(&mut self, tiling: f32) {
        self.uvs.clear();
        let Some(first) = self.vertices.first() else {
            return;
        };
        let (min, max) = self.vertices.iter().fold(
            (Vec2::new(first.x, first.z), Vec2::new(first.x, first.z)),
            |(min, max), v| {
                let p = Vec2::new(v.x, v.z);
                (min.min(p), max.max(p))
            },
        );
        let extent = max - min;
        let scale = |offset: f32, extent: f32| {
            if extent > 0.0 { offset / extent * tiling } else { 0.0 }
        };
        self.uvs.extend(
            self.vertices
                .iter()
                .map(|v| Vec2::new(scale(v.x - min.x, extent.x), scale(v.z - min.y, extent.y))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshData {
        let mut mesh = MeshData::new();
        let a = mesh.push_vertex(Vec3::new(0.0, 0.0, 0.0));
        let b = mesh.push_vertex(Vec3::new(2.0, 0.0, 0.0));
        let c = mesh.push_vertex(Vec3::new(2.0, 0.0, 4.0));
        let d = mesh.push_vertex(Vec3::new(0.0, 0.0, 4.0));
        mesh.push_triangle(a, b, c);
        mesh.push_triangle(a, c, d);
        mesh
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = MeshData::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_push_and_iterate() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        let triangles: Vec<[u32; 3]> = mesh.triangle_indices().collect();
        assert_eq!(triangles, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut mesh = quad();
        mesh.append(&quad());
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(&mesh.triangles[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_project_uvs_spans_tiling() {
        let mut mesh = quad();
        mesh.project_uvs(3.0);
        assert_eq!(mesh.uvs.len(), 4);
        assert_eq!(mesh.uvs[0], Vec2::ZERO);
        assert_eq!(mesh.uvs[2], Vec2::new(3.0, 3.0));
        assert_eq!(mesh.uvs[1], Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_project_uvs_degenerate_axis() {
        let mut mesh = MeshData::new();
        mesh.push_vertex(Vec3::new(1.0, 0.0, 5.0));
        mesh.push_vertex(Vec3::new(3.0, 0.0, 5.0));
        mesh.project_uvs(1.0);
        assert_eq!(mesh.uvs, vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)]);
    }
}
