/// Result alias for scene-graph operations.
pub type SceneResult<T> = std::result::Result<T, SceneError>;

/// Errors raised while mirroring the engine's scene graph.
///
/// Dispatch and playback never produce these; a missing interaction key or
/// a failed buffer fetch degrades to a logged no-op instead.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("a node named '{0}' already exists")]
    DuplicateName(String),
    #[error("no node named '{0}'")]
    UnknownNode(String),
    #[error("parent node is not in this scene graph")]
    InvalidParent,
}
