//! Keep track of tasks and how much progress was made on them. Every increment is remembered, so
//! progress can be charted by how old it is, straight from a terminal.
//!

pub mod chart;
pub mod cli;
pub mod tracker;
pub mod utils;
