//! Account identity, bearer credentials, and the redacted secret wrapper they share.

pub mod credential;
pub mod identity;
pub mod secret;

pub use credential::*;
pub use identity::*;
pub use secret::*;
