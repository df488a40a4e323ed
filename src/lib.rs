//! # Item Service
//!
//! A small CRUD service over a single `Item` resource backed by PostgreSQL.
//!
//! The interesting parts live in two layers, composed in strict dependency
//! order:
//!
//! - [`validation`]: pure functions that check and normalize untrusted
//!   payloads, distinguishing full (create/PUT) from partial (PATCH) input,
//!   with per-field violation reporting.
//! - [`models`]: the item repository, the only component that speaks to
//!   the store, including the dynamic partial-update statement built from a
//!   closed column set.
//!
//! Everything else is plumbing around them:
//!
//! - [`web`]: axum router, handlers, and the error-to-status mapping
//! - [`database`]: bounded connection pool construction
//! - [`config`]: environment-driven configuration (`PG*`, `PORT`)
//! - [`error`]: store error type
//! - [`logging`]: tracing subscriber setup
//!
//! Each request is an independent, stateless unit of work; the pool is the
//! only shared resource and the store is the single point of serialization
//! for conflicting writes.

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod validation;
pub mod web;
