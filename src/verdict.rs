//! Reduction of all annotation levels into one check-run conclusion.

use crate::annotation::{Annotation, Level};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Success,
    Failure,
}

/// Commutative reduction: failure if any level is failure, else success.
/// Computed once over the entire set before any network call so the final
/// batch can carry the correct conclusion.
pub fn aggregate(annotations: &[Annotation]) -> Verdict {
    if annotations
        .iter()
        .any(|a| a.annotation_level == Level::Failure)
    {
        Verdict::Failure
    } else {
        Verdict::Success
    }
}
