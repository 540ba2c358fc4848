/// Failure of a penetration depth query that could not converge.
///
/// This is distinct from the "no penetration" outcome (`Ok(None)`), which is a normal
/// result: the query either found no depth to report (touching contact) or was handed a
/// degenerate simplex. A `PenetrationError` means the configured capacities or tolerances
/// do not match the scale of the input, and the query refused to return a wrong answer.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PenetrationError {
    /// Every slot of the support point buffer was used before convergence.
    #[error("no convergence: the {capacity} support points available were exhausted")]
    SupportPointCapacity {
        /// The configured support point capacity.
        capacity: usize,
    },
    /// Every slot of the triangle arena was used before convergence.
    #[error("no convergence: the {capacity} triangles available were exhausted")]
    TriangleCapacity {
        /// The configured triangle capacity.
        capacity: usize,
    },
    /// Two edges that must be glued together did not have matching endpoints.
    #[error("no convergence: the expanded polytope is not a closed manifold")]
    BrokenTopology,
}

/// A defect of the triangle mesh found by [`TriangleMesh::check_topology`].
///
/// [`TriangleMesh::check_topology`]: crate::query::epa::TriangleMesh::check_topology
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TopologyError {
    /// A live triangle has an edge without neighbor.
    #[error("edge {edge} of triangle {triangle} is not linked")]
    Dangling {
        /// The triangle owning the edge.
        triangle: usize,
        /// The local index of the edge.
        edge: usize,
    },
    /// A live triangle is linked to an obsolete one.
    #[error("edge {edge} of triangle {triangle} is linked to the obsolete triangle {neighbor}")]
    ObsoleteNeighbor {
        /// The triangle owning the edge.
        triangle: usize,
        /// The local index of the edge.
        edge: usize,
        /// The obsolete neighbor.
        neighbor: usize,
    },
    /// The neighbor across an edge does not link back to that edge.
    #[error("edge {edge} of triangle {triangle} is not linked back by its neighbor")]
    OneWayLink {
        /// The triangle owning the edge.
        triangle: usize,
        /// The local index of the edge.
        edge: usize,
    },
    /// The endpoints of two linked edges do not match in reverse order.
    #[error("edge {edge} of triangle {triangle} is linked to an edge with other endpoints")]
    MismatchedEndpoints {
        /// The triangle owning the edge.
        triangle: usize,
        /// The local index of the edge.
        edge: usize,
    },
    /// A triangle is glued more than once to the same neighbor.
    #[error("triangle {triangle} is adjacent to triangle {neighbor} more than once")]
    RepeatedNeighbor {
        /// The triangle with the repeated neighbor.
        triangle: usize,
        /// The repeated neighbor.
        neighbor: usize,
    },
    /// Some live triangles cannot be reached through adjacency.
    #[error("only {reached} of the {live} live triangles are connected")]
    Disconnected {
        /// The number of live triangles reachable from the first one.
        reached: usize,
        /// The number of live triangles.
        live: usize,
    },
}
