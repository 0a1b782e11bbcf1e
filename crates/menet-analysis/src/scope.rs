//! Scope analysis: forward reachability over the bipartite graph.
//!
//! Starting from seed compounds, a reaction direction fires once all of
//! its non-blocked substrates are reachable (and at least one non-blocked
//! substrate exists); its products then join the reachable set. The loop
//! runs to fixpoint; the reachable sets grow monotonically, so it always
//! terminates on a finite graph. Blocked side compounds never trigger an
//! activation and never enter the result.
//!
//! Reversible reactions are handled per direction: the forward direction
//! fires on the reaction's substrates, the mirror direction on its
//! products, each tracked through the direction-encoding edge labels the
//! bipartite builder writes.

use indexmap::IndexSet;

use menet_core::{BioVertex, BipartiteGraph};

use crate::error::AnalysisError;

/// The result of a scope expansion: the reachable compounds (seeds
/// included) and the reactions that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub compounds: IndexSet<String>,
    pub reactions: IndexSet<String>,
}

fn require_compound(graph: &BipartiteGraph, id: &str) -> Result<(), AnalysisError> {
    match graph.vertex(id) {
        None => Err(AnalysisError::VertexNotFound(id.to_string())),
        Some(BioVertex::Reaction(_)) => Err(AnalysisError::NotACompound(id.to_string())),
        Some(BioVertex::Compound(_)) => Ok(()),
    }
}

fn require_reaction(graph: &BipartiteGraph, id: &str) -> Result<(), AnalysisError> {
    match graph.vertex(id) {
        None => Err(AnalysisError::VertexNotFound(id.to_string())),
        Some(BioVertex::Compound(_)) => Err(AnalysisError::NotAReaction(id.to_string())),
        Some(BioVertex::Reaction(_)) => Ok(()),
    }
}

/// One fireable direction of a reaction: the substrate/product sets under
/// a single direction label.
struct Direction {
    reaction: String,
    substrates: Vec<String>,
    products: Vec<String>,
}

fn directions(graph: &BipartiteGraph) -> Vec<Direction> {
    let mut result = Vec::new();
    for vertex in graph.vertices() {
        let BioVertex::Reaction(reaction) = vertex else {
            continue;
        };
        let mut labels: IndexSet<&str> = IndexSet::new();
        for edge in graph.edges_of(&reaction.id) {
            labels.insert(edge.label.as_str());
        }
        for label in labels {
            let substrates: Vec<String> = graph
                .in_edges(&reaction.id)
                .filter(|e| e.label == label)
                .map(|e| e.source.clone())
                .collect();
            let products: Vec<String> = graph
                .out_edges(&reaction.id)
                .filter(|e| e.label == label)
                .map(|e| e.target.clone())
                .collect();
            result.push(Direction {
                reaction: reaction.id.clone(),
                substrates,
                products,
            });
        }
    }
    result
}

/// Expand the scope of the seed compounds, with blocked side compounds
/// excluded from triggering (and from the result) and avoided reactions
/// never firing. Seeds and blocked ids must name compound vertices,
/// avoided ids reaction vertices; anything else fails fast.
pub fn scope(
    graph: &BipartiteGraph,
    seeds: &[&str],
    blocked: &[&str],
    avoided: &[&str],
) -> Result<Scope, AnalysisError> {
    for id in seeds.iter().chain(blocked) {
        require_compound(graph, id)?;
    }
    for id in avoided {
        require_reaction(graph, id)?;
    }
    let blocked: IndexSet<&str> = blocked.iter().copied().collect();
    let avoided: IndexSet<&str> = avoided.iter().copied().collect();

    let mut compounds: IndexSet<String> = seeds
        .iter()
        .filter(|s| !blocked.contains(*s))
        .map(|s| s.to_string())
        .collect();
    let mut reactions: IndexSet<String> = IndexSet::new();

    let directions = directions(graph);
    let mut fired = vec![false; directions.len()];
    loop {
        let mut changed = false;
        for (i, direction) in directions.iter().enumerate() {
            if fired[i] || avoided.contains(direction.reaction.as_str()) {
                continue;
            }
            let required: Vec<&str> = direction
                .substrates
                .iter()
                .map(String::as_str)
                .filter(|s| !blocked.contains(s))
                .collect();
            if required.is_empty() {
                // Nothing non-blocked can trigger this direction.
                continue;
            }
            if !required.iter().all(|s| compounds.contains(*s)) {
                continue;
            }
            fired[i] = true;
            reactions.insert(direction.reaction.clone());
            changed = true;
            for product in &direction.products {
                if !blocked.contains(product.as_str()) && compounds.insert(product.clone()) {
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    Ok(Scope {
        compounds,
        reactions,
    })
}

/// Scope expansion restricted to the elements lying on some producing
/// chain that reaches one of the target compounds.
pub fn scope_to_targets(
    graph: &BipartiteGraph,
    seeds: &[&str],
    blocked: &[&str],
    avoided: &[&str],
    targets: &[&str],
) -> Result<Scope, AnalysisError> {
    for id in targets {
        require_compound(graph, id)?;
    }
    let full = scope(graph, seeds, blocked, avoided)?;
    let blocked_set: IndexSet<&str> = blocked.iter().copied().collect();

    let mut compounds: IndexSet<String> = targets
        .iter()
        .filter(|t| full.compounds.contains(**t))
        .map(|t| t.to_string())
        .collect();
    let mut reactions: IndexSet<String> = IndexSet::new();

    // Walk backwards from the targets through the fired reactions.
    loop {
        let mut changed = false;
        for reaction in &full.reactions {
            if reactions.contains(reaction) {
                continue;
            }
            let makes_kept = graph
                .successors(reaction)
                .iter()
                .any(|p| compounds.contains(*p));
            if !makes_kept {
                continue;
            }
            reactions.insert(reaction.clone());
            changed = true;
            for substrate in graph.predecessors(reaction) {
                if full.compounds.contains(substrate)
                    && !blocked_set.contains(substrate)
                    && compounds.insert(substrate.to_string())
                {
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    Ok(Scope {
        compounds,
        reactions,
    })
}
