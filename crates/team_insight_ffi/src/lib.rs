//! Flutter-facing bindings for the team insight core.

pub mod api;
