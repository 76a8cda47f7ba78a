// src/transport/mod.rs
// =============================================================================
// This module is the boundary between gist logic and the network.
//
// Submodules:
// - requester: the HttpRequester trait, request/response types, decoding
// - reqwest: the default requester built on reqwest
// - testing: a scripted requester for unit tests (test builds only)
// =============================================================================

mod reqwest;
mod requester;

#[cfg(test)]
pub(crate) mod testing;

pub use self::reqwest::ReqwestRequester;
pub use self::requester::{
    execute, execute_json, execute_text, BasicAuth, Body, BodyFormat, HttpRequest, HttpRequester,
    Method, RawResponse,
};
