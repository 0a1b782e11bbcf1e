//! Builders deriving the graph topologies from a network snapshot.
//!
//! Each builder is a pure function from [`Network`] to a graph: no shared
//! mutable state across builds, and reversibility is read exactly once per
//! build. Reversibility drives edge symmetry: every edge derived from a
//! reversible reaction has a mirror in the opposite direction carrying the
//! same reaction identity.

use indexmap::{IndexMap, IndexSet};

use crate::graph::link::{
    BipartiteGraph, BipartiteLink, CompoundGraph, CompoundLink, PathwayGraph, PathwayLink,
    ReactionGraph, ReactionLink,
};
use crate::graph::vertex::{BioVertex, CompoundVertex, PathwayVertex, ReactionVertex};
use crate::graph::Edge;
use crate::network::{Network, Reaction};

/// Label of the mirror edge a reversible reaction contributes to the
/// bipartite graph, so (source, target, label) encodes reaction+direction.
pub fn reverse_label(reaction_id: &str) -> String {
    format!("{reaction_id}_rev")
}

fn compound_vertex(net: &Network, id: &str) -> CompoundVertex {
    let compound = net
        .compound(id)
        .expect("participants are validated on network insertion");
    CompoundVertex {
        id: compound.id.clone(),
        side: compound.side,
        compartment: compound.compartment.clone(),
    }
}

fn reaction_vertex(reaction: &Reaction) -> ReactionVertex {
    ReactionVertex {
        id: reaction.id.clone(),
        reversible: reaction.reversible,
        pathways: reaction.pathways.clone(),
    }
}

/// Build the compound graph: compounds as vertices, one edge
/// substrate→product per (substrate, product) pair of each reaction,
/// labeled by the reaction id. Reversible reactions also contribute the
/// mirrored product→substrate edge under the same label. Two reactions
/// sharing a pair yield two parallel edges.
pub fn compound_graph(net: &Network) -> CompoundGraph {
    let mut graph = CompoundGraph::new();
    for compound in net.compounds() {
        graph.add_vertex(compound_vertex(net, &compound.id));
    }
    for reaction in net.reactions() {
        for substrate in reaction.substrate_ids() {
            for product in reaction.product_ids() {
                if substrate == product {
                    continue;
                }
                add_reaction_edge(&mut graph, substrate, product, &reaction.id);
                if reaction.reversible {
                    add_reaction_edge(&mut graph, product, substrate, &reaction.id);
                }
            }
        }
    }
    graph
}

fn add_reaction_edge(graph: &mut CompoundGraph, source: &str, target: &str, reaction: &str) {
    // Repeated participants on one side would re-derive the same key.
    if graph.get_edge(source, target, reaction).is_some() {
        return;
    }
    graph
        .add_edge(Edge::new(source, target, reaction, ReactionLink::new(reaction)))
        .expect("compound vertices were inserted above");
}

/// Build the reaction graph: reactions as vertices, one edge
/// producer→consumer per compound the two share, labeled by the compound
/// id. Producer and consumer sets are reversibility-expanded.
pub fn reaction_graph(net: &Network) -> ReactionGraph {
    let mut graph = ReactionGraph::new();
    for reaction in net.reactions() {
        graph.add_vertex(reaction_vertex(reaction));
    }
    for compound in net.compounds() {
        for producer in net.producers_of(&compound.id) {
            for consumer in net.consumers_of(&compound.id) {
                if producer.id == consumer.id {
                    continue;
                }
                if graph
                    .get_edge(&producer.id, &consumer.id, &compound.id)
                    .is_some()
                {
                    continue;
                }
                graph
                    .add_edge(Edge::new(
                        &producer.id,
                        &consumer.id,
                        &compound.id,
                        CompoundLink::new(&compound.id),
                    ))
                    .expect("reaction vertices were inserted above");
            }
        }
    }
    graph
}

/// Build the bipartite graph: substrate→reaction and reaction→product
/// edges labeled by the reaction id. Reversible reactions mirror every
/// edge under the `{rid}_rev` label with `reversible = true`; edges
/// touching side-flagged compounds carry `side = true`.
///
/// Exchange reactions (an empty substrate or product side) still yield a
/// reaction vertex, degree 0 on the missing side.
pub fn bipartite_graph(net: &Network) -> BipartiteGraph {
    let mut graph = BipartiteGraph::new();
    for compound in net.compounds() {
        graph.add_vertex(BioVertex::Compound(compound_vertex(net, &compound.id)));
    }
    for reaction in net.reactions() {
        graph.add_vertex(BioVertex::Reaction(reaction_vertex(reaction)));
    }
    for reaction in net.reactions() {
        for substrate in reaction.substrate_ids() {
            let side = net
                .compound(substrate)
                .expect("participants are validated on network insertion")
                .side;
            add_bipartite_edge(&mut graph, substrate, &reaction.id, &reaction.id, false, side);
            if reaction.reversible {
                let label = reverse_label(&reaction.id);
                add_bipartite_edge(&mut graph, &reaction.id, substrate, &label, true, side);
            }
        }
        for product in reaction.product_ids() {
            let side = net
                .compound(product)
                .expect("participants are validated on network insertion")
                .side;
            add_bipartite_edge(&mut graph, &reaction.id, product, &reaction.id, false, side);
            if reaction.reversible {
                let label = reverse_label(&reaction.id);
                add_bipartite_edge(&mut graph, product, &reaction.id, &label, true, side);
            }
        }
    }
    graph
}

fn add_bipartite_edge(
    graph: &mut BipartiteGraph,
    source: &str,
    target: &str,
    label: &str,
    reversible: bool,
    side: bool,
) {
    if graph.get_edge(source, target, label).is_some() {
        return;
    }
    graph
        .add_edge(Edge::new(
            source,
            target,
            label,
            BipartiteLink { reversible, side },
        ))
        .expect("both partitions were populated above");
}

/// Build the pathway connectivity graph: one edge pathway→pathway when a
/// compound producible under the first pathway is consumable under the
/// second; the payload records those connector compounds.
pub fn pathway_graph(net: &Network) -> PathwayGraph {
    let mut graph = PathwayGraph::new();
    let pathways = net.pathways();
    for pathway in &pathways {
        graph.add_vertex(PathwayVertex::new(pathway.clone()));
    }

    // Compounds producible / consumable under each pathway, with
    // reversibility expanded the same way the reaction graph expands it.
    let mut produced: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
    let mut consumed: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
    for reaction in net.reactions() {
        for pathway in &reaction.pathways {
            let produced = produced.entry(pathway.as_str()).or_default();
            let consumed = consumed.entry(pathway.as_str()).or_default();
            for substrate in reaction.substrate_ids() {
                consumed.insert(substrate);
                if reaction.reversible {
                    produced.insert(substrate);
                }
            }
            for product in reaction.product_ids() {
                produced.insert(product);
                if reaction.reversible {
                    consumed.insert(product);
                }
            }
        }
    }

    for from in &pathways {
        for to in &pathways {
            if from == to {
                continue;
            }
            let (Some(produced), Some(consumed)) =
                (produced.get(from.as_str()), consumed.get(to.as_str()))
            else {
                continue;
            };
            let connectors: IndexSet<String> = produced
                .intersection(consumed)
                .map(|c| c.to_string())
                .collect();
            if connectors.is_empty() {
                continue;
            }
            graph
                .add_edge(Edge::new(
                    from.clone(),
                    to.clone(),
                    format!("{from}->{to}"),
                    PathwayLink { connectors },
                ))
                .expect("pathway vertices were inserted above");
        }
    }
    graph
}
