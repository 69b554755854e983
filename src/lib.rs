//! PennyWise server library
//!
//! Exposes the API router and server wiring so integration tests can
//! drive the composed HTTP surface in-process.

#![forbid(unsafe_code)]

pub mod api;
pub mod cli;
pub mod server;
