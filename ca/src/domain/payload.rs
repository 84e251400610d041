//! Opaque payload handles

use serde::{Deserialize, Serialize};

/// Opaque reference to producer-side payload data
///
/// The engine carries this value through scheduling and hands it back to the
/// owning adapter at dispatch time. It never dereferences it; what the number
/// identifies (a distribution row, an adjustment batch) is the producer's
/// business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayloadRef(pub u64);

impl std::fmt::Display for PayloadRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
