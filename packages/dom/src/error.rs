use crate::NodeId;
use thiserror::Error;

pub type DomResult<T> = Result<T, DomError>;

#[derive(Error, Debug)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("Node {0} cannot have children")]
    CannotHaveChildren(NodeId),

    #[error("Inserting {child} under {parent} would create a cycle")]
    HierarchyCycle { parent: NodeId, child: NodeId },

    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("Node {0} is not character data")]
    NotCharacterData(NodeId),

    #[error("Node {0} is detached from the document")]
    Detached(NodeId),

    #[error("Offset {offset} is out of bounds for node {node} (length {length})")]
    InvalidOffset {
        node: NodeId,
        offset: usize,
        length: usize,
    },

    #[error("Range end precedes its start")]
    InvertedRange,

    #[error("No node at path {0:?}")]
    PathNotFound(Vec<usize>),

    #[error("Invalid boundary point: {0}")]
    InvalidPoint(String),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}
