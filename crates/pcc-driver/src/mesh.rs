use pcc_decoder::Value;

use crate::binding::{ElementBinding, ElementKind, PropertyBinding, Role};
use crate::codec::RecordVisitor;
use crate::config::FaceArity;
use crate::error::DriverError;

/// A closed triangulated solid used as the containment reference.
///
/// Built once by the boundary pass and read-only afterwards. Every
/// triangle index is guaranteed to be below the vertex count.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryShape {
    vertices: Vec<[f64; 3]>,
    triangles: Vec<[u32; 3]>,
    min: [f64; 3],
    max: [f64; 3],
}

impl BoundaryShape {
    /// # Errors
    ///
    /// - [`DriverError::EmptyBoundary`] if there are no triangles.
    /// - [`DriverError::FaceIndexOutOfRange`] if a triangle refers to a
    ///   vertex that does not exist. `face` is the triangle's position.
    pub fn new(vertices: Vec<[f64; 3]>, triangles: Vec<[u32; 3]>) -> Result<Self, DriverError> {
        let faces: Vec<u64> = (0..triangles.len() as u64).collect();
        Self::with_faces(vertices, triangles, &faces)
    }

    /// Like [`new`](Self::new), reporting errors against the face record
    /// each triangle came from.
    fn with_faces(
        vertices: Vec<[f64; 3]>,
        triangles: Vec<[u32; 3]>,
        faces: &[u64],
    ) -> Result<Self, DriverError> {
        if triangles.is_empty() {
            return Err(DriverError::EmptyBoundary);
        }
        for (triangle, face) in triangles.iter().zip(faces) {
            if let Some(&index) = triangle.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(DriverError::FaceIndexOutOfRange {
                    face: *face,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for triangle in &triangles {
            for &index in triangle {
                let point = vertices[index as usize];
                for axis in 0..3 {
                    min[axis] = min[axis].min(point[axis]);
                    max[axis] = max[axis].max(point[axis]);
                }
            }
        }

        Ok(Self {
            vertices,
            triangles,
            min,
            max,
        })
    }

    #[must_use]
    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    #[must_use]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Corner points of the triangles.
    pub fn triangle_points(&self) -> impl Iterator<Item = [[f64; 3]; 3]> + '_ {
        self.triangles
            .iter()
            .map(|t| t.map(|index| self.vertices[index as usize]))
    }

    /// Axis-aligned bounds of the triangles, as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> ([f64; 3], [f64; 3]) {
        (self.min, self.max)
    }

    /// Whether `point` lies within the bounds, edges included.
    #[must_use]
    pub fn bounds_contain(&self, point: [f64; 3]) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }
}

/// Boundary-pass consumer: assembles a [`BoundaryShape`] from the
/// decoded vertex coordinates and face index lists.
///
/// A vertex is appended when its record ends, so `x`, `y` and `z` may
/// be declared in any order. Face lists are checked against the
/// [`FaceArity`] policy as soon as their length is known.
///
/// ```text
///   vertex record:  x ─┐
///                   y ─┼─▶ point ──▶ vertices.push(point)   (end_record)
///                   z ─┘
///   face record:    n, i0, i1, ... ──▶ triangles.push([i0, ik, ik+1])
/// ```
#[derive(Debug)]
pub struct MeshAccumulator {
    arity: FaceArity,
    vertices: Vec<[f64; 3]>,
    triangles: Vec<[u32; 3]>,
    /// Face record each triangle came from.
    faces: Vec<u64>,
    point: [f64; 3],
    polygon: Vec<u32>,
    face: u64,
}

impl MeshAccumulator {
    #[must_use]
    pub fn new(arity: FaceArity) -> Self {
        Self {
            arity,
            vertices: Vec::new(),
            triangles: Vec::new(),
            faces: Vec::new(),
            point: [0.0; 3],
            polygon: Vec::with_capacity(3),
            face: 0,
        }
    }

    /// Stage one coordinate of the current vertex.
    pub fn stage_coordinate(&mut self, axis: usize, value: f64) {
        self.point[axis] = value;
    }

    /// Append the staged vertex.
    pub fn push_vertex(&mut self) {
        self.vertices.push(self.point);
        self.point = [0.0; 3];
    }

    /// Start a face whose index list has `arity` entries.
    ///
    /// # Errors
    ///
    /// - [`DriverError::DegenerateFace`] if `arity` < 3.
    /// - [`DriverError::NonTriangularFace`] if `arity` ≠ 3 and the policy
    ///   is [`FaceArity::Reject`].
    pub fn begin_face(&mut self, face: u64, arity: u64) -> Result<(), DriverError> {
        if arity < 3 {
            return Err(DriverError::DegenerateFace { face, arity });
        }
        if arity != 3 && self.arity == FaceArity::Reject {
            return Err(DriverError::NonTriangularFace { face, arity });
        }
        self.face = face;
        self.polygon.clear();
        Ok(())
    }

    /// Add one index to the current face.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::InvalidFaceIndex`] for values that are
    /// negative, fractional or above `u32::MAX`.
    pub fn push_index(&mut self, value: pcc_wire::Scalar) -> Result<(), DriverError> {
        let index = value
            .to_index()
            .and_then(|i| u32::try_from(i).ok())
            .ok_or_else(|| DriverError::InvalidFaceIndex {
                face: self.face,
                value: value.to_string(),
            })?;
        self.polygon.push(index);
        Ok(())
    }

    /// Close the current face, fanning it into triangles around its
    /// first index.
    pub fn end_face(&mut self) {
        if let Some((&first, rest)) = self.polygon.split_first() {
            for pair in rest.windows(2) {
                self.triangles.push([first, pair[0], pair[1]]);
                self.faces.push(self.face);
            }
        }
        self.polygon.clear();
    }

    /// Validate and freeze the accumulated mesh.
    ///
    /// # Errors
    ///
    /// Same as [`BoundaryShape::new`], with `face` naming the face record.
    pub fn finish(self) -> Result<BoundaryShape, DriverError> {
        BoundaryShape::with_faces(self.vertices, self.triangles, &self.faces)
    }
}

impl RecordVisitor for MeshAccumulator {
    fn begin_record(&mut self, element: &ElementBinding, record: u64) -> Result<(), DriverError> {
        if element.kind == ElementKind::Face {
            self.face = record;
        }
        Ok(())
    }

    fn scalar(&mut self, property: &PropertyBinding, value: Value<'_>) -> Result<(), DriverError> {
        if let Role::Coordinate(axis) = property.role {
            self.stage_coordinate(axis, value.scalar.to_f64());
        }
        Ok(())
    }

    fn list_begin(&mut self, property: &PropertyBinding, count: Value<'_>) -> Result<(), DriverError> {
        if property.role == Role::FaceIndices {
            // Count prefixes are unsigned, so this only fails for
            // lengths the codec has already rejected.
            let arity = count.scalar.to_index().unwrap_or_default();
            self.begin_face(self.face, arity)?;
        }
        Ok(())
    }

    fn list_element(&mut self, property: &PropertyBinding, value: Value<'_>) -> Result<(), DriverError> {
        if property.role == Role::FaceIndices {
            self.push_index(value.scalar)?;
        }
        Ok(())
    }

    fn list_end(&mut self, property: &PropertyBinding) -> Result<(), DriverError> {
        if property.role == Role::FaceIndices {
            self.end_face();
        }
        Ok(())
    }

    fn end_record(&mut self, element: &ElementBinding, _record: u64) -> Result<(), DriverError> {
        if element.kind == ElementKind::Vertex {
            self.push_vertex();
        }
        Ok(())
    }
}

/// The unit cube as 8 vertices and 12 outward-facing triangles.
#[cfg(test)]
pub(crate) fn unit_cube() -> BoundaryShape {
    let vertices = vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ];
    let triangles = vec![
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [1, 2, 6],
        [1, 6, 5],
        [2, 3, 7],
        [2, 7, 6],
        [3, 0, 4],
        [3, 4, 7],
    ];
    BoundaryShape::new(vertices, triangles).unwrap()
}
