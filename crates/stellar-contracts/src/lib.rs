//! # stellar-contracts
//!
//! Shared types, events, and error contracts for the Stellar Health
//! diagnostic client.
//!
//! All crates in the workspace import from here. No workflow logic lives in
//! this crate: only data definitions, wire shapes and error types.

pub mod config;
pub mod error;
pub mod event;
pub mod notification;
pub mod outcome;
pub mod request;
pub mod wire;
