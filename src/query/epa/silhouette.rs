//! Removal of the faces visible from a new vertex, and retriangulation of the hole.

use crate::query::gjk::CSOPoint;
use crate::query::PenetrationError;
use alloc::vec::Vec;

use super::mesh::{circ_next, circ_prev, Edge, TriangleId, TriangleMesh};

/// Walks the faces of a [`TriangleMesh`] visible from a new vertex.
///
/// The walker only owns the log of the triangles it marked obsolete, so that a branch of
/// the walk can be undone. It can be reused across expansions.
#[derive(Clone, Debug, Default)]
pub struct SilhouetteWalker {
    marked: Vec<TriangleId>,
}

impl SilhouetteWalker {
    /// Creates a new walker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces `seed` and every face connected to it and visible from `vertices[apex]` by a
    /// fan of triangles joining `apex` to the boundary of the removed region.
    ///
    /// `seed` must be a live face visible from the apex. The new triangles are allocated
    /// contiguously, starting at the arena cursor found on entry.
    ///
    /// Returns `Ok(false)` if the apex is numerically degenerate with the boundary of the
    /// seed face, in which case the mesh must no longer be expanded. The mesh is left
    /// untouched in that case, and also when the triangle capacity runs out during the walk.
    pub fn expand(
        &mut self,
        mesh: &mut TriangleMesh,
        vertices: &[CSOPoint],
        seed: TriangleId,
        apex: usize,
    ) -> Result<bool, PenetrationError> {
        self.marked.clear();

        let first = mesh.free();
        self.mark(mesh, seed);

        let walked = self.walk_around(mesh, vertices, seed, apex);

        if walked != Ok(true) {
            // Leave the polytope as it was found.
            self.rollback(mesh, 0, first);
            return walked;
        }

        let last = mesh.free();

        if first == last {
            log::debug!("Hit unexpected state in EPA: empty silhouette.");
            return Err(PenetrationError::BrokenTopology);
        }

        // Close the fan: glue each new triangle to the face it was built on, and to the
        // triangle created just before it.
        let mut prev = last - 1;

        for curr in first..last {
            let far = mesh[curr].adj(1).ok_or(PenetrationError::BrokenTopology)?;
            mesh.half_link(far, Edge::new(curr, 1));

            if !mesh.link(Edge::new(curr, 0), Edge::new(prev, 2)) {
                log::debug!(
                    "Hit unexpected state in EPA: triangles {} and {} of the silhouette fan do not share an edge.",
                    curr,
                    prev
                );
                return Err(PenetrationError::BrokenTopology);
            }

            prev = curr;
        }

        Ok(true)
    }

    /// Walks across the three edges of `seed`, which was just marked obsolete.
    fn walk_around(
        &mut self,
        mesh: &mut TriangleMesh,
        vertices: &[CSOPoint],
        seed: TriangleId,
        apex: usize,
    ) -> Result<bool, PenetrationError> {
        for i in 0..3 {
            let edge = mesh[seed].adj(i).ok_or(PenetrationError::BrokenTopology)?;

            if !self.walk(mesh, vertices, edge, apex)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Continues the walk across `edge`, the edge of a non-obsolete neighbor of a face
    /// that was just marked obsolete.
    fn walk(
        &mut self,
        mesh: &mut TriangleMesh,
        vertices: &[CSOPoint],
        edge: Edge,
        apex: usize,
    ) -> Result<bool, PenetrationError> {
        let triangle = &mesh[edge.triangle];

        if triangle.is_obsolete() {
            return Ok(true);
        }

        if !triangle.is_visible_from(&vertices[apex].point) {
            return Self::patch(mesh, vertices, edge, apex);
        }

        let next = triangle
            .adj(circ_next(edge.index))
            .ok_or(PenetrationError::BrokenTopology)?;
        let prev = triangle
            .adj(circ_prev(edge.index))
            .ok_or(PenetrationError::BrokenTopology)?;

        let cursor = mesh.free();
        let marked = self.marked.len();
        self.mark(mesh, edge.triangle);

        if self.walk(mesh, vertices, next, apex)? && self.walk(mesh, vertices, prev, apex)? {
            return Ok(true);
        }

        // Keep this face, and everything the failed branch removed, in the polytope.
        self.rollback(mesh, marked, cursor);
        Self::patch(mesh, vertices, edge, apex)
    }

    /// Builds the triangle joining `apex` to `edge`, on the outer side of `edge`.
    fn patch(
        mesh: &mut TriangleMesh,
        vertices: &[CSOPoint],
        edge: Edge,
        apex: usize,
    ) -> Result<bool, PenetrationError> {
        let (source, target) = (mesh.source(edge), mesh.target(edge));

        match mesh.new_triangle(vertices, apex, target, source)? {
            Some(id) => {
                mesh.half_link(Edge::new(id, 1), edge);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn mark(&mut self, mesh: &mut TriangleMesh, id: TriangleId) {
        mesh.set_obsolete(id, true);
        self.marked.push(id);
    }

    /// Restores every triangle marked since the log had `marked` entries, and forgets every
    /// triangle allocated since the arena cursor was at `cursor`.
    pub(crate) fn rollback(&mut self, mesh: &mut TriangleMesh, marked: usize, cursor: TriangleId) {
        for id in self.marked.drain(marked..) {
            mesh.set_obsolete(id, false);
        }

        mesh.truncate(cursor);
    }
}
