//! Structural reductions of proof DAGs.
//!
//! The main data structure, [`Dag`], is a table of proof [`Node`]s together
//! with the set of _leaves_ (the final conclusions of the derivation). Each
//! node names the premises it was derived from as its _parents_.
//!
//! Given a set of relevant node identifiers, [`algo::filter_non_parents`]
//! keeps the relevant nodes and everything they were derived from, while
//! [`algo::filter_non_consequences`] keeps the relevant nodes and everything
//! derived from them, replacing severed premises with _boundary_ nodes.
//!
//! DAGs can be built with [`Dag::new`] or loaded from JSON with
//! [`Dag::from_json`].

/// Algorithms for reducing proof DAGs to the part relevant to a selection
pub mod algo;

pub mod traversal;

mod convert;
mod core;
mod error;

pub use crate::core::*;
pub use crate::error::{DagError, DagResult};
