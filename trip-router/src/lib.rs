//! Multimodal trip router.
//!
//! Answers: "I'm standing here - which walks and transit rides get me
//! over there fastest?" over a network of metro, tram and bus lines.

pub mod cache;
pub mod domain;
pub mod loader;
pub mod planner;
pub mod web;
