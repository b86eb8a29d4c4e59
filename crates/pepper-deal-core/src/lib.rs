pub mod coins;
pub mod delay;
pub mod deposit;
pub mod error;
pub mod holidays;
pub mod profit;
pub mod rules;
pub mod types;

#[cfg(feature = "reference")]
pub mod reference;

pub use error::PepperDealError;
pub use types::*;

/// Standard result type for all pepper-deal operations
pub type PepperDealResult<T> = Result<T, PepperDealError>;
