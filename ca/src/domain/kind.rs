//! Corporate-action kinds

use serde::{Deserialize, Serialize};

/// The closed set of corporate-action task kinds
///
/// Each kind maps to exactly one producer adapter. Adding a new corporate
/// action means adding a variant here and registering an adapter for it;
/// there is no runtime-open registry of string tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Holder snapshot for an upcoming distribution
    Snapshot,
    /// Coupon or dividend payment run
    CouponPayment,
    /// Scheduled balance adjustment
    BalanceAdjustment,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snapshot => write!(f, "snapshot"),
            Self::CouponPayment => write!(f, "coupon-payment"),
            Self::BalanceAdjustment => write!(f, "balance-adjustment"),
        }
    }
}

impl std::str::FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snapshot" => Ok(Self::Snapshot),
            "coupon-payment" => Ok(Self::CouponPayment),
            "balance-adjustment" => Ok(Self::BalanceAdjustment),
            _ => Err(format!("Unknown action kind: {}", s)),
        }
    }
}
