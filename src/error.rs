/// Errors raised while building or reducing a maze graph.
///
/// Traversal never fails: a move to an out-of-range or unconnected cell is
/// simply ignored, so only construction can go wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    /// Width or height was not strictly positive, or the cell count does not fit in memory.
    #[error("invalid maze dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    /// The edge queue ran dry before a spanning tree was complete.
    /// Only a disconnected input graph can get here.
    #[error("graph is disconnected: accepted {accepted} of {required} spanning tree edges")]
    InsufficientEdges { accepted: usize, required: usize },
}

pub type Result<T> = std::result::Result<T, MazeError>;

impl From<MazeError> for std::io::Error {
    fn from(err: MazeError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    }
}
