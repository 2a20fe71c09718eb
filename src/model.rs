//! Request and response payloads for the service's endpoints.
//!
//! Field names match the service's JSON layout; the payload of each response envelope is
//! decoded directly into the matching `*Response` type.

pub mod account;
pub mod printer;

pub use account::*;
pub use printer::*;
