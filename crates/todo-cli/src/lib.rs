//! Terminal front-end for the todo view synchronizer
//!
//! Each command loads the list, applies one UI event and prints the
//! resulting view as a table, JSON or markup.

pub mod commands;
pub mod config;
