//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: bit widths and codes (source of truth)
//! - `reader`: safe bit access and protocol conventions
//! - `parser`: domain-level decoding (no direct bit arithmetic)
//! - `error`: explicit, actionable errors
//!
//! `bits` and `baudot` are the shared building blocks underneath. Everything
//! here is pure and contains no I/O.

pub mod baudot;
pub mod beacon;
pub mod bits;
