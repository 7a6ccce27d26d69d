//! Mesh extraction for cave maps: marching-squares triangulation of the wall
//! mass, boundary outlines, and wall extrusion along them.

pub mod marching_squares;
pub mod mesh_data;
pub mod outline;
pub mod walls;

pub use marching_squares::{MeshSettings, configuration, triangulate};
pub use mesh_data::MeshData;
pub use outline::{Outline, extract_outlines, is_left_of, shared_triangle_count};
pub use walls::{build_walls, face_normal};
