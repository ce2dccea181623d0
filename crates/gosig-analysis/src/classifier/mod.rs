//! Representability policy for function signatures.
//!
//! A signature is supported when it is a plain function over basic types,
//! with the error contract additionally allowed in result position.

pub mod signature;
pub mod type_classifier;

pub use signature::{classify_signature, SignatureSupport, UnsupportedReason};
pub use type_classifier::{
    implements_error_contract, is_representable, simplify, SimplifiedType, TypePosition,
};
