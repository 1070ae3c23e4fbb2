//! Credit balance arithmetic.
//!
//! Balances are stored as integer units, one hundredth of a display
//! credit each, so fractional credits never touch floating point at
//! rest. Spending and purchasing belong to the payment system; this
//! crate only converts for display and pre-flight gating.

/// Stored units per display credit.
pub const UNITS_PER_CREDIT: i64 = 100;

/// Convert a raw unit balance to display credits.
pub fn units_to_credits(units: i64) -> f64 {
    units as f64 / UNITS_PER_CREDIT as f64
}

/// Whether a balance covers a cost expressed in display credits.
pub fn covers(units: i64, cost_credits: f64) -> bool {
    units_to_credits(units) >= cost_credits
}
