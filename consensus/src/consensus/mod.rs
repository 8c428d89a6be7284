//! Wiring of the stores and consensus processes over one backend.

pub mod services;

pub use services::ConsensusServices;
