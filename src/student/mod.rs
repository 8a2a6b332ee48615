//! Student command handling for the task board.
//!
//! Students claim, complete, and release tasks by posting slash commands as
//! issue comments. This module validates each command against a snapshot of
//! the task and the commenter's identity, drives the backend state
//! transition, mirrors the release on the tracker, and produces the templated
//! reply. The module follows hexagonal architecture:
//!
//! - Domain types and the command state machine in [`domain`]
//! - Port contracts for the backend and the tracker in [`ports`]
//! - HTTP and in-memory adapter implementations in [`adapters`]
//! - The command dispatcher in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
