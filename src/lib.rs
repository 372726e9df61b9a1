//! Stake and profit calculation engine for surebets and bonus extraction.
//!
//! Everything under [`calc`] is pure: no I/O, no shared state, same input
//! gives the same (rounded) output. The binary wraps it in a small
//! HTTP/WebSocket calculator service.

pub mod calc;
pub mod errors;
