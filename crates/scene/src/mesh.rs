use bytemuck::{Pod, Zeroable};
use std::f32::consts::PI;

/// Segments per axis of the default sphere.
pub const DEFAULT_SPHERE_SEGMENTS: u32 = 70;

/// Errors from procedural mesh generation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("sphere needs at least 3 segments per axis, got {x_segments}x{y_segments}")]
    TooFewSegments { x_segments: u32, y_segments: u32 },
    #[error("sphere with {x_segments}x{y_segments} segments exceeds u32 vertex indices")]
    TooManyVertices { x_segments: u32, y_segments: u32 },
}

/// Position + normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Position + normal + per-vertex colour.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColoredVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// Indexed triangle list.
#[derive(Debug, Clone)]
pub struct Mesh<V, I = u32> {
    pub vertices: Vec<V>,
    pub indices: Vec<I>,
}

impl<V, I> Mesh<V, I> {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Generate a unit UV sphere centred at the origin.
///
/// Vertices form an `(x_segments + 1) x (y_segments + 1)` grid; the seam and
/// poles are duplicated so every cell has its own corners. Normals equal
/// positions.
pub fn sphere_mesh(x_segments: u32, y_segments: u32) -> Result<Mesh<Vertex>, GeometryError> {
    if x_segments < 3 || y_segments < 3 {
        return Err(GeometryError::TooFewSegments {
            x_segments,
            y_segments,
        });
    }
    let vertex_count = (u64::from(x_segments) + 1) * (u64::from(y_segments) + 1);
    if vertex_count > u64::from(u32::MAX) {
        return Err(GeometryError::TooManyVertices {
            x_segments,
            y_segments,
        });
    }

    let mut vertices = Vec::with_capacity(vertex_count as usize);
    for y in 0..=y_segments {
        for x in 0..=x_segments {
            let u = x as f32 / x_segments as f32;
            let v = y as f32 / y_segments as f32;
            let p = [
                (u * 2.0 * PI).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * 2.0 * PI).sin() * (v * PI).sin(),
            ];
            vertices.push(Vertex {
                position: p,
                normal: p,
            });
        }
    }

    let stride = x_segments + 1;
    let mut indices = Vec::with_capacity(x_segments as usize * y_segments as usize * 6);
    for i in 0..y_segments {
        for j in 0..x_segments {
            let a = i * stride + j;
            let b = (i + 1) * stride + j;
            indices.extend_from_slice(&[a, b, b + 1, a, b + 1, a + 1]);
        }
    }

    tracing::debug!(
        vertices = vertices.len(),
        indices = indices.len(),
        "generated sphere mesh"
    );
    Ok(Mesh { vertices, indices })
}

/// The drill: a hand-authored prism, 6 faces of 2 triangles, non-indexed.
#[allow(clippy::excessive_precision)]
pub fn drill_mesh() -> Vec<ColoredVertex> {
    const fn v(p: [f32; 3], n: [f32; 3], c: [f32; 3]) -> ColoredVertex {
        ColoredVertex {
            position: p,
            normal: n,
            color: c,
        }
    }
    const TIP: [f32; 3] = [0.42, 0.0, 0.4];

    #[rustfmt::skip]
    let vertices = vec![
        // -Z
        v([-0.5, 0.5, -0.5],   [0.0, 0.0, -1.0], [0.131538, 0.75865, 0.218959]),
        v([ 0.5, 0.5, -0.5],   [0.0, 0.0, -1.0], [0.678865, 0.934693, 0.519416]),
        v([ 0.5, 0.65, -0.5],  [0.0, 0.0, -1.0], [0.0345721, 0.85297, 0.00769819]),
        v([ 0.5, 0.65, -0.5],  [0.0, 0.0, -1.0], [0.0668422, 0.8686773, 0.1930436]),
        v([-0.5, 1.3, -0.75],  [0.0, 0.0, -1.0], TIP),
        v([-0.5, 0.5, -0.5],   [0.0, 0.0, -1.0], [0.526929, 0.7653919, 0.701191]),
        // +Z
        v([-0.5, 0.5, 0.5],    [0.0, 0.0, 1.0],  [0.762198, 0.90474645, 0.328234]),
        v([ 0.5, 0.5, 0.5],    [0.0, 0.0, 1.0],  [0.75641, 0.7365339, 0.198255]),
        v([ 0.5, 1.3, 0.75],   [0.0, 0.0, 1.0],  TIP),
        v([ 0.5, 1.3, 0.75],   [0.0, 0.0, 1.0],  TIP),
        v([-0.5, 0.65, 0.5],   [0.0, 0.0, 1.0],  [0.2753356, 0.70726859, 0.1884707]),
        v([-0.5, 0.5, 0.5],    [0.0, 0.0, 1.0],  [0.436411, 0.9477732, 0.274907]),
        // -X
        v([-0.5, 0.65, 0.5],   [-1.0, 0.0, 0.0], [0.166507, 0.897656, 0.0605643]),
        v([-0.5, 1.3, -0.75],  [-1.0, 0.0, 0.0], TIP),
        v([-0.5, 0.5, -0.5],   [-1.0, 0.0, 0.0], [0.004523, 0.8319033, 0.493977]),
        v([-0.5, 0.5, -0.5],   [-1.0, 0.0, 0.0], [0.0907329, 0.90737491, 0.384142]),
        v([-0.5, 0.5, 0.5],    [-1.0, 0.0, 0.0], [0.1913817, 0.8464446, 0.050084]),
        v([-0.5, 0.65, 0.5],   [-1.0, 0.0, 0.0], [0.1770205, 0.7125365, 0.1688455]),
        // +X
        v([ 0.5, 1.3, 0.75],   [1.0, 0.0, 0.0],  TIP),
        v([ 0.5, 0.65, -0.5],  [1.0, 0.0, 0.0],  [0.069543, 0.725412, 0.2888572]),
        v([ 0.5, 0.5, -0.5],   [1.0, 0.0, 0.0],  [0.306322, 0.513274, 0.2845982]),
        v([ 0.5, 0.5, -0.5],   [1.0, 0.0, 0.0],  [0.2841511, 0.9415395, 0.1467917]),
        v([ 0.5, 0.5, 0.5],    [1.0, 0.0, 0.0],  [0.49848, 0.748293, 0.3890737]),
        v([ 0.5, 1.3, 0.75],   [1.0, 0.0, 0.0],  TIP),
        // -Y
        v([-0.5, 0.5, -0.5],   [0.0, -1.0, 0.0], [0.14, 0.98039, 0.4392157]),
        v([ 0.5, 0.5, -0.5],   [0.0, -1.0, 0.0], [0.13, 0.744, 0.55]),
        v([ 0.5, 0.5, 0.5],    [0.0, -1.0, 0.0], [0.184204, 0.7212752, 0.130427]),
        v([ 0.5, 0.5, 0.5],    [0.0, -1.0, 0.0], [0.274588, 0.7414293, 0.70982]),
        v([-0.5, 0.5, 0.5],    [0.0, -1.0, 0.0], [0.845576, 0.955409, 0.148152]),
        v([-0.5, 0.5, -0.5],   [0.0, -1.0, 0.0], [0.408767, 0.7564899, 0.488515]),
        // +Y
        v([-0.5, 0.7, -0.5],   [0.0, 1.0, 0.0],  [0.0961095, 0.7199757, 0.629269]),
        v([ 0.5, 0.65, -0.5],  [0.0, 1.0, 0.0],  [0.651254, 0.803073, 0.476432]),
        v([ 0.5, 0.7, 0.5],    [0.0, 1.0, 0.0],  [0.20325, 0.901673, 0.142021]),
        v([ 0.5, 0.7, 0.5],    [0.0, 1.0, 0.0],  [0.410313, 0.885648, 0.162199]),
        v([-0.5, 0.65, 0.5],   [0.0, 1.0, 0.0],  [0.365339, 0.9135109, 0.455307]),
        v([-0.5, 0.7, -0.5],   [0.0, 1.0, 0.0],  [0.0817561, 0.462245, 0.632739]),
    ];
    vertices
}

/// Unit cube centred at the origin, used as the light marker.
pub fn lamp_cube_mesh() -> Mesh<Vertex, u16> {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        Vertex { position: [-p, -p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [-p,  p,  p], normal: [0.0, 0.0, 1.0] },
        // -Z face
        Vertex { position: [ p, -p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-p, -p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 0.0, -1.0] },
        // +X face
        Vertex { position: [ p, -p,  p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p, -p, -p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [1.0, 0.0, 0.0] },
        // -X face
        Vertex { position: [-p, -p, -p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p,  p,  p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [-1.0, 0.0, 0.0] },
        // +Y face
        Vertex { position: [-p,  p,  p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 1.0, 0.0] },
        // -Y face
        Vertex { position: [-p, -p, -p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ p, -p, -p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [0.0, -1.0, 0.0] },
    ];
    #[rustfmt::skip]
    let indices: Vec<u16> = vec![
        0,1,2, 2,3,0,       // +Z
        4,5,6, 6,7,4,       // -Z
        8,9,10, 10,11,8,    // +X
        12,13,14, 14,15,12, // -X
        16,17,18, 18,19,16, // +Y
        20,21,22, 22,23,20, // -Y
    ];
    Mesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sphere_counts() {
        let mesh = sphere_mesh(DEFAULT_SPHERE_SEGMENTS, DEFAULT_SPHERE_SEGMENTS).unwrap();
        assert_eq!(mesh.vertices.len(), 71 * 71);
        assert_eq!(mesh.indices.len(), 70 * 70 * 6);
        assert_eq!(mesh.triangle_count(), 70 * 70 * 2);
    }

    #[test]
    fn sphere_vertices_lie_on_unit_sphere() {
        let mesh = sphere_mesh(12, 8).unwrap();
        for v in &mesh.vertices {
            let p = glam::Vec3::from(v.position);
            assert!((p.length() - 1.0).abs() < 1e-5);
            assert_eq!(v.position, v.normal);
        }
    }

    #[test]
    fn sphere_poles() {
        let mesh = sphere_mesh(4, 4).unwrap();
        let first = mesh.vertices.first().unwrap();
        let last = mesh.vertices.last().unwrap();
        assert!((first.position[1] - 1.0).abs() < 1e-6);
        assert!((last.position[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn sphere_indices_in_range() {
        let mesh = sphere_mesh(5, 3).unwrap();
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
        // first cell: a=0, b=6
        assert_eq!(&mesh.indices[..6], &[0, 6, 7, 0, 7, 1]);
    }

    #[test]
    fn sphere_rejects_degenerate_segments() {
        assert_eq!(
            sphere_mesh(2, 10).unwrap_err(),
            GeometryError::TooFewSegments {
                x_segments: 2,
                y_segments: 10
            }
        );
        assert!(sphere_mesh(10, 0).is_err());
    }

    #[test]
    fn sphere_rejects_unindexable_size() {
        let err = sphere_mesh(u32::MAX - 1, 4).unwrap_err();
        assert!(matches!(err, GeometryError::TooManyVertices { .. }));
    }

    #[test]
    fn drill_is_twelve_triangles_with_unit_normals() {
        let drill = drill_mesh();
        assert_eq!(drill.len(), 36);
        for v in &drill {
            let n = glam::Vec3::from(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-6);
            assert!(v.color.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn lamp_cube_counts() {
        let cube = lamp_cube_mesh();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert!(cube.indices.iter().all(|&i| (i as usize) < cube.vertices.len()));
    }
}
