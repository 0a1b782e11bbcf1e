//! Choke-point detection.
//!
//! A reaction is a choke point when it is the unique producer or the
//! unique consumer of some compound. The bipartite graph already encodes
//! reversibility as mirror edges, so producer/consumer sets here are the
//! plain predecessor/successor reaction sets around each compound vertex.

use indexmap::IndexSet;

use menet_core::{BioVertex, BipartiteGraph};

/// Reactions that are the unique producer or unique consumer of some
/// compound, in first-detected order. No choke points is an empty set,
/// not an error.
pub fn choke_points(graph: &BipartiteGraph) -> IndexSet<String> {
    let mut result = IndexSet::new();
    for vertex in graph.vertices() {
        let BioVertex::Compound(compound) = vertex else {
            continue;
        };
        let producers = graph.predecessors(&compound.id);
        if let [only] = producers.as_slice() {
            result.insert(only.to_string());
        }
        let consumers = graph.successors(&compound.id);
        if let [only] = consumers.as_slice() {
            result.insert(only.to_string());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use menet_core::{bipartite_graph, Compound, Network, Reaction};

    /// R1: A -> B + C, R2: A -> D + C, R3 (reversible): B + C <-> D.
    fn fixture() -> Network {
        let mut net = Network::new();
        for id in ["A", "B", "C", "D"] {
            net.add_compound(Compound::new(id)).unwrap();
        }
        net.add_reaction(
            Reaction::new("R1")
                .with_substrate("A", 1.0)
                .with_product("B", 1.0)
                .with_product("C", 1.0),
        )
        .unwrap();
        net.add_reaction(
            Reaction::new("R2")
                .with_substrate("A", 1.0)
                .with_product("D", 1.0)
                .with_product("C", 1.0),
        )
        .unwrap();
        net.add_reaction(
            Reaction::new("R3")
                .with_reversible(true)
                .with_substrate("B", 1.0)
                .with_substrate("C", 1.0)
                .with_product("D", 1.0),
        )
        .unwrap();
        net
    }

    #[test]
    fn single_choke_point_in_the_fixture() {
        let graph = bipartite_graph(&fixture());
        let points = choke_points(&graph);
        assert_eq!(points.len(), 1);
        assert!(points.contains("R3"));
    }

    #[test]
    fn no_choke_points_is_an_empty_set() {
        let mut net = Network::new();
        for id in ["A", "B"] {
            net.add_compound(Compound::new(id)).unwrap();
        }
        // Two parallel routes: neither reaction is unique for anything
        // except... both produce and consume the same pair, so every
        // producer/consumer set has two members.
        for id in ["R1", "R2"] {
            net.add_reaction(
                Reaction::new(id)
                    .with_reversible(true)
                    .with_substrate("A", 1.0)
                    .with_product("B", 1.0),
            )
            .unwrap();
        }
        let graph = bipartite_graph(&net);
        assert!(choke_points(&graph).is_empty());
    }

    #[test]
    fn sole_consumer_is_detected() {
        let mut net = Network::new();
        for id in ["A", "B", "C"] {
            net.add_compound(Compound::new(id)).unwrap();
        }
        net.add_reaction(
            Reaction::new("R1")
                .with_substrate("A", 1.0)
                .with_product("B", 1.0),
        )
        .unwrap();
        net.add_reaction(
            Reaction::new("R2")
                .with_substrate("A", 1.0)
                .with_product("B", 1.0),
        )
        .unwrap();
        net.add_reaction(
            Reaction::new("R3")
                .with_substrate("B", 1.0)
                .with_product("C", 1.0),
        )
        .unwrap();
        let graph = bipartite_graph(&net);
        let points = choke_points(&graph);
        // R3 uniquely consumes B and uniquely produces C; A has no
        // producer and two consumers.
        assert_eq!(points.len(), 1);
        assert!(points.contains("R3"));
    }
}
