pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::autotask::AutotaskClient;
pub use config::AutotaskConfig;
pub use core::handler::{CompaniesHandler, HttpResponse};
pub use utils::error::{CompaniesError, Result};
