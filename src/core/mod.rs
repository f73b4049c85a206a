pub mod handler;

pub use crate::domain::model::{CompanyRecord, CompanySummary};
pub use crate::domain::ports::CompanySource;
pub use crate::utils::error::Result;
