//! Taskboard: student-side command handling for an issue-tracker task board.
//!
//! Tasks are tracker issues that students claim, complete, and release by
//! posting slash commands as comments. This crate validates each command
//! against the task's state and the commenter's identity, drives the
//! matching transition on the task backend, mirrors releases on the tracker,
//! and renders the reply comment.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure command, task, and template types with no I/O
//! - **Ports**: Abstract trait interfaces for the backend and the tracker
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory)
//!
//! # Modules
//!
//! - [`student`]: Student command dispatch
//! - [`config`]: Startup configuration
//! - [`telemetry`]: Logging initialisation

pub mod config;
pub mod student;
pub mod telemetry;
