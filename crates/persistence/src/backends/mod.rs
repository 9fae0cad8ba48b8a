//! Backend implementations.
//!
//! This module contains implementations of the store traits. The core ships
//! a single backend: an in-memory store whose conditional writes and
//! uniqueness constraints are resolved under one lock acquisition, which is
//! the in-process equivalent of the single-row conditional update the
//! contract demands from a database-backed implementation.
//!
//! A durable backend is an embedder concern - any store offering
//! unique-constraint inserts and "update iff current value matches
//! expected" can implement these traits.

pub mod memory;
