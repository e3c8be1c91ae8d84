//! Credential records cached by the SDK: access tokens, jsapi tickets, and their shared lifecycle.

pub mod kind;
pub mod record;
pub mod secret;

pub use kind::*;
pub use record::*;
pub use secret::*;
