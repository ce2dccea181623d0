//! Whole-signature classification.

use smallvec::SmallVec;

use super::type_classifier::{is_representable, TypePosition};
use crate::types::{Signature, TypeTable};

/// Why a signature cannot be represented. Indices are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedReason {
    Receiver,
    TypeParameters,
    Variadic,
    Parameter(usize),
    Result(usize),
}

/// Outcome of [`classify_signature`]: every failing check, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureSupport {
    pub reasons: SmallVec<[UnsupportedReason; 4]>,
}

impl SignatureSupport {
    pub fn is_supported(&self) -> bool {
        self.reasons.is_empty()
    }
}

/// Evaluate every representability check against `sig`.
pub fn classify_signature(sig: &Signature, table: &TypeTable) -> SignatureSupport {
    let mut reasons = SmallVec::new();
    if sig.receiver.is_some() {
        reasons.push(UnsupportedReason::Receiver);
    }
    if !sig.type_params.is_empty() {
        reasons.push(UnsupportedReason::TypeParameters);
    }
    if sig.variadic {
        reasons.push(UnsupportedReason::Variadic);
    }
    for (i, param) in sig.params.iter().enumerate() {
        if !is_representable(&param.ty, TypePosition::Parameter, table) {
            reasons.push(UnsupportedReason::Parameter(i));
        }
    }
    for (i, result) in sig.results.iter().enumerate() {
        if !is_representable(&result.ty, TypePosition::Result, table) {
            reasons.push(UnsupportedReason::Result(i));
        }
    }
    SignatureSupport { reasons }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BasicKind, Type, TypeParam, Var, ERROR_ID};

    fn var(name: &str, ty: Type) -> Var {
        Var {
            name: name.into(),
            ty,
        }
    }

    #[test]
    fn plain_function_is_supported() {
        let table = TypeTable::new();
        let sig = Signature {
            params: vec![
                var("a", Type::Basic(BasicKind::Int)),
                var("b", Type::Basic(BasicKind::Float64)),
            ],
            results: vec![var("", Type::Basic(BasicKind::Bool)), var("", Type::named(ERROR_ID))],
            ..Signature::default()
        };
        assert!(classify_signature(&sig, &table).is_supported());
    }

    #[test]
    fn every_failing_check_is_reported() {
        let table = TypeTable::new();
        let sig = Signature {
            receiver: Some(var("s", Type::Basic(BasicKind::Int))),
            type_params: vec![TypeParam {
                name: "T".into(),
                constraint: Type::empty_interface(),
            }],
            params: vec![
                var("err", Type::named(ERROR_ID)),
                var("rest", Type::Slice(Box::new(Type::Basic(BasicKind::Int)))),
            ],
            results: vec![var("", Type::TypeParam("T".into()))],
            variadic: true,
        };
        let support = classify_signature(&sig, &table);
        assert!(!support.is_supported());
        assert_eq!(
            support.reasons.as_slice(),
            &[
                UnsupportedReason::Receiver,
                UnsupportedReason::TypeParameters,
                UnsupportedReason::Variadic,
                UnsupportedReason::Parameter(0),
                UnsupportedReason::Parameter(1),
                UnsupportedReason::Result(0),
            ]
        );
    }

    #[test]
    fn variadic_of_basic_is_still_unsupported() {
        let table = TypeTable::new();
        let sig = Signature {
            params: vec![var("xs", Type::Slice(Box::new(Type::Basic(BasicKind::Int))))],
            variadic: true,
            ..Signature::default()
        };
        let support = classify_signature(&sig, &table);
        assert!(support.reasons.contains(&UnsupportedReason::Variadic));
    }
}
