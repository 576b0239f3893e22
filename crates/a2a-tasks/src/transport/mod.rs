//! Transport layer: wire-level bindings for the task protocol.
//!
//! - `jsonrpc`: JSON-RPC 2.0 envelopes and their codec
//! - `error_codes`: the fixed JSON-RPC error table
//! - `http`: the send / open-event-stream capability and its reqwest implementation
//! - `sse`: decoded, cancelable task event streams

pub mod error_codes;
pub mod http;
pub mod jsonrpc;
pub mod sse;
