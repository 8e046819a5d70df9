//! Engine-agnostic mirror of the scene graph.
//!
//! The embedding renderer owns node lifetime; this arena mirrors the pieces
//! the interaction core reads and writes: names, parent links, transforms,
//! and material opacity. Nodes are never removed, so a [`NodeId`] stays valid
//! for the whole session.

use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;

use crate::error::{SceneError, SceneResult};

/// Opaque handle to a node in the scene graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One scene node: identity, hierarchy, and the mutable properties the
/// interaction handlers animate.
#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 8]>,
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub opacity: f32,
    pub visible: bool,
}

impl Node {
    fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            children: SmallVec::new(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            opacity: 1.0,
            visible: true,
        }
    }
}

#[derive(Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    by_name: FnvHashMap<String, NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node under `parent` (or at the root). Names are the dispatch
    /// keys, so they must be unique.
    pub fn add(&mut self, name: impl Into<String>, parent: Option<NodeId>) -> SceneResult<NodeId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(SceneError::DuplicateName(name));
        }
        if let Some(p) = parent {
            if p.index() >= self.nodes.len() {
                return Err(SceneError::InvalidParent);
            }
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(name.clone(), parent));
        self.by_name.insert(name, id);
        if let Some(p) = parent {
            self.nodes[p.index()].children.push(id);
        }
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.name.as_str())
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// First direct child whose name ends with `suffix`. Handlers use this to
    /// find hinge/lid/mouth sub-nodes without hard-coding full names.
    pub fn child_suffixed(&self, id: NodeId, suffix: &str) -> Option<NodeId> {
        let node = self.get(id)?;
        node.children
            .iter()
            .copied()
            .find(|c| self.name(*c).is_some_and(|n| n.ends_with(suffix)))
    }

    /// Depth-first traversal over root nodes and their subtrees.
    pub fn traverse(&self, mut visit: impl FnMut(NodeId, &Node)) {
        let roots: Vec<NodeId> = (0..self.nodes.len() as u32)
            .map(NodeId)
            .filter(|id| self.nodes[id.index()].parent.is_none())
            .collect();
        let mut stack: Vec<NodeId> = roots.into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.index()];
            visit(id, node);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
    }
}
