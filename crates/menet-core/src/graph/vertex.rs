//! Concrete vertex kinds for the derived graph topologies.

use serde::{Deserialize, Serialize};

use super::{Side, Vertex};

/// A compound vertex: identifier plus the read-only flags consumed from the
/// entity model (side/cofactor status, compartment membership).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundVertex {
    pub id: String,
    /// Side/cofactor flag; consulted when marking or filtering edges, never
    /// mutated by the core.
    pub side: bool,
    pub compartment: Option<String>,
}

impl CompoundVertex {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            side: false,
            compartment: None,
        }
    }

    pub fn with_side(mut self, side: bool) -> Self {
        self.side = side;
        self
    }

    pub fn with_compartment(mut self, compartment: impl Into<String>) -> Self {
        self.compartment = Some(compartment.into());
        self
    }
}

impl Vertex for CompoundVertex {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A reaction vertex: identifier, reversibility, and pathway membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionVertex {
    pub id: String,
    pub reversible: bool,
    pub pathways: Vec<String>,
}

impl ReactionVertex {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reversible: false,
            pathways: Vec::new(),
        }
    }

    pub fn with_reversible(mut self, reversible: bool) -> Self {
        self.reversible = reversible;
        self
    }

    pub fn with_pathway(mut self, pathway: impl Into<String>) -> Self {
        self.pathways.push(pathway.into());
        self
    }
}

impl Vertex for ReactionVertex {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Vertex kind of the bipartite graph: a closed sum over the two sides.
///
/// Reports its [`Side`] so the container rejects compound–compound and
/// reaction–reaction edges at insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BioVertex {
    Compound(CompoundVertex),
    Reaction(ReactionVertex),
}

impl BioVertex {
    pub fn is_compound(&self) -> bool {
        matches!(self, BioVertex::Compound(_))
    }

    pub fn is_reaction(&self) -> bool {
        matches!(self, BioVertex::Reaction(_))
    }

    pub fn as_compound(&self) -> Option<&CompoundVertex> {
        match self {
            BioVertex::Compound(c) => Some(c),
            BioVertex::Reaction(_) => None,
        }
    }

    pub fn as_reaction(&self) -> Option<&ReactionVertex> {
        match self {
            BioVertex::Compound(_) => None,
            BioVertex::Reaction(r) => Some(r),
        }
    }
}

impl Vertex for BioVertex {
    fn id(&self) -> &str {
        match self {
            BioVertex::Compound(c) => &c.id,
            BioVertex::Reaction(r) => &r.id,
        }
    }

    fn partition(&self) -> Option<Side> {
        Some(match self {
            BioVertex::Compound(_) => Side::Compound,
            BioVertex::Reaction(_) => Side::Reaction,
        })
    }
}

/// A pathway vertex for the pathway connectivity graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayVertex {
    pub id: String,
}

impl PathwayVertex {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Vertex for PathwayVertex {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bio_vertex_partitions() {
        let c = BioVertex::Compound(CompoundVertex::new("atp"));
        let r = BioVertex::Reaction(ReactionVertex::new("pgi"));
        assert_eq!(c.partition(), Some(Side::Compound));
        assert_eq!(r.partition(), Some(Side::Reaction));
        assert!(c.as_compound().is_some());
        assert!(r.as_reaction().is_some());
    }

    #[test]
    fn homogeneous_vertices_have_no_partition() {
        assert_eq!(CompoundVertex::new("a").partition(), None);
        assert_eq!(ReactionVertex::new("r").partition(), None);
    }
}
