//! Token representations
//!
//! [`JwtBuilder`] assembles and signs tokens; [`DecodedToken`] is the parsed
//! but untrusted form; [`VerifiedToken`] is the only representation whose
//! claims are safe to act on.

mod builder;
mod decoded;
mod verified;

pub use builder::JwtBuilder;
pub use decoded::DecodedToken;
pub use verified::VerifiedToken;
