//! FuzzyFan library.
//!
//! Mamdani fuzzy inference plus the plumbing that drives a fan from a
//! serial temperature/humidity sensor node.  Exposes every layer for
//! integration testing; only the serial adapter needs the `serial` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod fuzzy;
pub mod protocol;

pub use error::{Error, Result};
