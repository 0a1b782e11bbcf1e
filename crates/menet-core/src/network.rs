//! The entity reference view: compounds, reactions, and the owning network.
//!
//! This is the read-only model the graph builders consume. Compounds and
//! reactions live in flat, insertion-ordered collections keyed by their
//! stable string id; cross-references are resolved by id lookup through the
//! owning [`Network`], so there are no back-pointers to keep in sync.
//! The core never mutates side/cofactor flags or participant lists; it
//! only reads them, once per build.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while assembling or querying a network.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("compound already present: {0}")]
    DuplicateCompound(String),

    #[error("reaction already present: {0}")]
    DuplicateReaction(String),

    #[error("reaction {reaction} references unknown compound {compound}")]
    UnknownParticipant { reaction: String, compound: String },

    #[error("compound not found: {0}")]
    UnknownCompound(String),

    #[error("reaction not found: {0}")]
    UnknownReaction(String),
}

/// A chemical species scoped to a compartment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    pub id: String,
    pub name: Option<String>,
    pub compartment: Option<String>,
    /// Side/cofactor flag (water, ATP, ...), read-only input to the core.
    pub side: bool,
}

impl Compound {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            compartment: None,
            side: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_compartment(mut self, compartment: impl Into<String>) -> Self {
        self.compartment = Some(compartment.into());
        self
    }

    pub fn with_side(mut self, side: bool) -> Self {
        self.side = side;
        self
    }
}

/// A stoichiometric participation of a compound in a reaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub compound: String,
    pub coefficient: f64,
}

impl Participant {
    pub fn new(compound: impl Into<String>, coefficient: f64) -> Self {
        Self {
            compound: compound.into(),
            coefficient,
        }
    }
}

/// A conversion between substrate and product compounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: String,
    pub name: Option<String>,
    pub reversible: bool,
    pub substrates: Vec<Participant>,
    pub products: Vec<Participant>,
    pub pathways: Vec<String>,
}

impl Reaction {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            reversible: false,
            substrates: Vec::new(),
            products: Vec::new(),
            pathways: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_reversible(mut self, reversible: bool) -> Self {
        self.reversible = reversible;
        self
    }

    pub fn with_substrate(mut self, compound: impl Into<String>, coefficient: f64) -> Self {
        self.substrates.push(Participant::new(compound, coefficient));
        self
    }

    pub fn with_product(mut self, compound: impl Into<String>, coefficient: f64) -> Self {
        self.products.push(Participant::new(compound, coefficient));
        self
    }

    pub fn with_pathway(mut self, pathway: impl Into<String>) -> Self {
        self.pathways.push(pathway.into());
        self
    }

    /// Ids of substrate compounds, in declaration order.
    pub fn substrate_ids(&self) -> impl Iterator<Item = &str> {
        self.substrates.iter().map(|p| p.compound.as_str())
    }

    /// Ids of product compounds, in declaration order.
    pub fn product_ids(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|p| p.compound.as_str())
    }
}

/// The owning arena for one metabolic network snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Network {
    compounds: IndexMap<String, Compound>,
    reactions: IndexMap<String, Reaction>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a compound. Duplicate ids are rejected.
    pub fn add_compound(&mut self, compound: Compound) -> Result<(), NetworkError> {
        if self.compounds.contains_key(&compound.id) {
            return Err(NetworkError::DuplicateCompound(compound.id));
        }
        self.compounds.insert(compound.id.clone(), compound);
        Ok(())
    }

    /// Insert a reaction. Duplicate ids and participants naming unknown
    /// compounds are rejected: the arena never holds dangling references.
    pub fn add_reaction(&mut self, reaction: Reaction) -> Result<(), NetworkError> {
        if self.reactions.contains_key(&reaction.id) {
            return Err(NetworkError::DuplicateReaction(reaction.id));
        }
        for participant in reaction.substrates.iter().chain(&reaction.products) {
            if !self.compounds.contains_key(&participant.compound) {
                return Err(NetworkError::UnknownParticipant {
                    reaction: reaction.id.clone(),
                    compound: participant.compound.clone(),
                });
            }
        }
        self.reactions.insert(reaction.id.clone(), reaction);
        Ok(())
    }

    pub fn compound(&self, id: &str) -> Option<&Compound> {
        self.compounds.get(id)
    }

    pub fn reaction(&self, id: &str) -> Option<&Reaction> {
        self.reactions.get(id)
    }

    pub fn compounds(&self) -> impl Iterator<Item = &Compound> {
        self.compounds.values()
    }

    pub fn reactions(&self) -> impl Iterator<Item = &Reaction> {
        self.reactions.values()
    }

    pub fn compound_count(&self) -> usize {
        self.compounds.len()
    }

    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    /// Reactions able to produce a compound, with reversibility expanded:
    /// a reaction produces `id` if `id` is among its products, or among its
    /// substrates and the reaction is reversible.
    pub fn producers_of(&self, id: &str) -> Vec<&Reaction> {
        self.reactions
            .values()
            .filter(|r| {
                r.product_ids().any(|c| c == id)
                    || (r.reversible && r.substrate_ids().any(|c| c == id))
            })
            .collect()
    }

    /// Reactions able to consume a compound, with reversibility expanded.
    pub fn consumers_of(&self, id: &str) -> Vec<&Reaction> {
        self.reactions
            .values()
            .filter(|r| {
                r.substrate_ids().any(|c| c == id)
                    || (r.reversible && r.product_ids().any(|c| c == id))
            })
            .collect()
    }

    /// All pathway names mentioned by any reaction, in first-seen order.
    pub fn pathways(&self) -> IndexSet<String> {
        let mut names = IndexSet::new();
        for reaction in self.reactions.values() {
            for pathway in &reaction.pathways {
                names.insert(pathway.clone());
            }
        }
        names
    }

    /// A reaction is an exchange reaction when one of its sides is empty.
    /// Such reactions still become graph vertices with a degree-0 side.
    pub fn is_exchange_reaction(&self, id: &str) -> Result<bool, NetworkError> {
        let reaction = self
            .reactions
            .get(id)
            .ok_or_else(|| NetworkError::UnknownReaction(id.to_string()))?;
        Ok(reaction.substrates.is_empty() || reaction.products.is_empty())
    }

    /// A reaction is a transport reaction when its participants span at
    /// least two distinct compartments. Compounds without a compartment do
    /// not contribute.
    pub fn is_transport_reaction(&self, id: &str) -> Result<bool, NetworkError> {
        let reaction = self
            .reactions
            .get(id)
            .ok_or_else(|| NetworkError::UnknownReaction(id.to_string()))?;
        let mut compartments: IndexSet<&str> = IndexSet::new();
        for participant in reaction.substrates.iter().chain(&reaction.products) {
            let compound = self
                .compounds
                .get(&participant.compound)
                .expect("participants are validated on insertion");
            if let Some(compartment) = &compound.compartment {
                compartments.insert(compartment.as_str());
            }
        }
        Ok(compartments.len() >= 2)
    }
}
