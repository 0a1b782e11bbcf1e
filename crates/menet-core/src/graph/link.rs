//! Edge payload kinds and the graph-type aliases built from them.
//!
//! Each derived topology pairs a vertex kind with a payload kind:
//! the compound graph labels edges by inducing reaction, the reaction graph
//! by connecting compound, the bipartite graph carries reversibility and
//! side flags, and the compressed/merged kinds carry the elements they
//! stand in for so constituent edges can be reconstructed.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::vertex::{BioVertex, CompoundVertex, PathwayVertex, ReactionVertex};
use super::{Edge, Multigraph};

/// Payload of a compound-graph edge: the reaction that induced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionLink {
    pub reaction: String,
}

impl ReactionLink {
    pub fn new(reaction: impl Into<String>) -> Self {
        Self {
            reaction: reaction.into(),
        }
    }
}

/// Payload of a reaction-graph edge: the compound connecting the two
/// reactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundLink {
    pub compound: String,
}

impl CompoundLink {
    pub fn new(compound: impl Into<String>) -> Self {
        Self {
            compound: compound.into(),
        }
    }
}

/// Payload of a bipartite edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BipartiteLink {
    /// True on the mirror edges a reversible reaction adds.
    pub reversible: bool,
    /// True when the compound endpoint is flagged side/cofactor.
    pub side: bool,
}

/// Payload of a compressed-graph edge: the full path it represents, with
/// the path's length (edge count) and weight tracked separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathLink<P> {
    pub edges: Vec<Edge<P>>,
    pub length: f64,
    pub weight: f64,
}

/// Payload of a merged-graph edge: the parallel edges collapsed into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedLink<P> {
    pub merged: Vec<Edge<P>>,
}

/// Payload of a pathway-graph edge: the compounds connecting the two
/// pathways.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayLink {
    pub connectors: IndexSet<String>,
}

/// Compounds as vertices, reactions collapsed to labeled edges.
pub type CompoundGraph = Multigraph<CompoundVertex, ReactionLink>;

/// Reactions as vertices, compounds collapsed to labeled edges.
pub type ReactionGraph = Multigraph<ReactionVertex, CompoundLink>;

/// Compounds and reactions both as vertices; edges cross the partition.
pub type BipartiteGraph = Multigraph<BioVertex, BipartiteLink>;

/// A graph whose edges each stand for a whole path of the source graph.
pub type CompressedGraph<V, P> = Multigraph<V, PathLink<P>>;

/// A graph whose edges each stand for a set of collapsed parallel edges.
pub type MergedGraph<V, P> = Multigraph<V, MergedLink<P>>;

/// Pathways as vertices, shared-compound connectivity as edges.
pub type PathwayGraph = Multigraph<PathwayVertex, PathwayLink>;
