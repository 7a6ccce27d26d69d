//! Vertical wall strips extruded down from outline loops.

use glam::{Vec2, Vec3};

use crate::mesh_data::MeshData;
use crate::outline::Outline;

/// Builds one quad per outline edge, spanning from each outline vertex
/// down to `height` below it.
///
/// Outlines keep the wall mass on their left, so every quad is wound to
/// face right of the walk: into the open cave. Each quad has its own four
/// vertices; UVs run along the outline in world units on u and from top
/// (0) to bottom (1) on v.
pub fn build_walls(mesh: &MeshData, outlines: &[Outline], height: f32) -> MeshData {
    let mut walls = MeshData::new();
    if height <= 0.0 {
        return walls;
    }
    let drop = Vec3::new(0.0, height, 0.0);

    for outline in outlines {
        let mut distance = 0.0;
        for (a, b) in outline.edges() {
            let top_a = mesh.vertices[a as usize];
            let top_b = mesh.vertices[b as usize];
            let length = top_a.distance(top_b);

            let base = walls.push_vertex(top_a);
            walls.push_vertex(top_b);
            walls.push_vertex(top_a - drop);
            walls.push_vertex(top_b - drop);
            walls.push_triangle(base, base + 1, base + 2);
            walls.push_triangle(base + 1, base + 3, base + 2);

            walls.uvs.extend_from_slice(&[
                Vec2::new(distance, 0.0),
                Vec2::new(distance + length, 0.0),
                Vec2::new(distance, 1.0),
                Vec2::new(distance + length, 1.0),
            ]);
            distance += length;
        }
    }
    tracing::debug!(
        "extruded {} wall quads from {} outlines",
        walls.triangle_count() / 2,
        outlines.len()
    );
    walls
}

/// Unnormalised face normal of a triangle by the right-hand rule.
pub fn face_normal(mesh: &MeshData, [a, b, c]: [u32; 3]) -> Vec3 {
    let (a, b, c) = (
        mesh.vertices[a as usize],
        mesh.vertices[b as usize],
        mesh.vertices[c as usize],
    );
    (b - a).cross(c - a)
}
