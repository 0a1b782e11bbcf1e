//! Structural network analyses over the bipartite graph.
//!
//! - [`choke_points`]: reactions that are the unique producer or unique
//!   consumer of some compound,
//! - [`scope`] / [`scope_to_targets`]: forward-reachability expansion
//!   from seed compounds under the all-substrates-present rule, with
//!   blocked side compounds and avoided reactions.

pub mod choke;
pub mod error;
pub mod scope;

pub use choke::choke_points;
pub use error::AnalysisError;
pub use scope::{scope, scope_to_targets, Scope};
