//! Source assembly engine for the scriptfuse build pipeline.
//!
//! This crate turns many independently-authored script fragments into a
//! single namespace-scoped compilation unit ready for an external compiler:
//! - `extract`: header directive scanning and body slicing
//! - `registry`: ordered, deduplicating directive set
//! - `store`: namespace-keyed fragment body accumulation
//! - `assemble`: the structured compilation unit and its rendering
//! - `embed`: base64 embedding of serialized binary payloads
//! - `gateway`: the external compiler boundary
//! - `assembler`: the per-invocation engine facade
//! - `diagnostics`: severity-graded, source-located error reporting
//!
//! Fragment bodies are opaque text here; nothing in this crate parses or
//! validates their semantics.

pub mod assemble;
pub mod assembler;
pub mod config;
pub mod diagnostics;
pub mod embed;
pub mod extract;
pub mod gateway;
pub mod registry;
pub mod source;
pub mod store;
