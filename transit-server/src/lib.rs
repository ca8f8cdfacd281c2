//! Transit segment resolver server.
//!
//! Answers "which buses do I take from stop A to stop B?" for a fixed-route
//! network described only by ordered stop lists.

pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
