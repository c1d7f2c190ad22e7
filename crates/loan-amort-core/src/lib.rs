pub mod annuity;
pub mod error;
pub mod types;

pub mod analysis;
pub mod emi;
pub mod outstanding;
pub mod prepayment;

#[cfg(feature = "schedule")]
pub mod schedule;

pub use error::LoanAmortError;
pub use types::*;

/// Standard result type for all loan-amort operations
pub type LoanAmortResult<T> = Result<T, LoanAmortError>;
