//! Shared UI crate for the RuralCare triage client. Cross-platform logic and
//! views live here; the web shell only wires up routing and assets.

pub mod core;
pub mod triage;
pub mod views;
