//! Domain layer: invariant-preserving engines and the services that drive them.
//!
//! `layout`, `booking` and `ordering` hold the pure rules (overlap predicates, next-order
//! computation). `service` loads aggregates through the `repo` traits, applies those rules
//! and writes the result back.

pub mod booking;
pub mod error;
pub mod layout;
pub mod ordering;
pub mod ports;
pub mod repo;
pub mod service;
