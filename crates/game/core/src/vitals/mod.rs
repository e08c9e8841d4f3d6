//! Health and death resolution.

mod ledger;

pub use ledger::{DamageOutcome, VitalityLedger, VitalsError};
