//! Core library for numfacts
//!
//! This crate implements the **Functional Core** of the numfacts application:
//! pure number-classification logic with zero I/O.
//!
//! The project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`numfacts_core`** (this crate): deterministic numeric predicates,
//!   input validation, and output transforms
//! - **`numfacts`**: I/O operations and orchestration (CLI, HTTP server,
//!   Numbers API client)
//!
//! Every function in this crate is pure: same input, same output, no side
//! effects. All of it can be tested with plain fixture data, no mocking
//! required.

pub mod classify;
