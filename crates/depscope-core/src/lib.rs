//! Core engine for depscope: dependency-count auditing over package-lister output.
//!
//! Takes a stream of package metadata records (e.g. `go list -json ... all`),
//! classifies packages against a static ignore ruleset, counts distinct direct
//! incoming and raw outgoing dependencies per package (optionally rolled up per
//! module), and produces a deterministically ordered report.

pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod package;
pub mod report;
