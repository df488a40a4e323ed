//! HTTP request handlers.

pub mod items;
