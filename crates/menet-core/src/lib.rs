//! Core data structures for metabolic network graph analysis.
//!
//! This crate owns the three building blocks every other menet crate is
//! written against:
//!
//! - the entity reference view ([`Network`], [`Compound`], [`Reaction`]):
//!   a read-only, id-keyed snapshot of a metabolic model,
//! - the typed multigraph container ([`Multigraph`]) with its edge identity
//!   contract ([`EdgeKey`]) and per-kind vertex/payload types,
//! - the graph builders deriving the compound, reaction, bipartite, and
//!   pathway topologies from a network, and the weighting policies that
//!   assign edge weights after the fact.
//!
//! Graphs are built once per analysis session; downstream algorithms either
//! read them or derive new graphs. The only in-place mutations in the whole
//! workspace are the weighting policies here and the filters in
//! `menet-transform`, both documented as such.

pub mod builder;
pub mod graph;
pub mod network;
pub mod weight;

pub use builder::{bipartite_graph, compound_graph, pathway_graph, reaction_graph};
pub use graph::link::{
    BipartiteGraph, BipartiteLink, CompoundGraph, CompoundLink, CompressedGraph, MergedGraph,
    MergedLink, PathLink, PathwayGraph, PathwayLink, ReactionGraph, ReactionLink,
};
pub use graph::vertex::{BioVertex, CompoundVertex, PathwayVertex, ReactionVertex};
pub use graph::{Edge, EdgeKey, GraphError, Multigraph, Side, Vertex};
pub use network::{Compound, Network, NetworkError, Participant, Reaction};
pub use weight::{
    DegreeWeights, ProbabilityWeights, SimilarityWeights, StochasticWeights, UniformWeights,
    WeightError, WeightTable, WeightingPolicy,
};
