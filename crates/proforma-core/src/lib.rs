pub mod error;
pub mod types;

pub mod assumptions;
pub mod validation;

pub mod income;
pub mod financing;
pub mod cashflow;
pub mod disposition;

pub mod time_value;
pub mod analysis;

pub use error::ProformaError;
pub use types::*;

/// Standard result type for all proforma operations
pub type ProformaResult<T> = Result<T, ProformaError>;
