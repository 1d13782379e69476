mod app_error;
mod gcdm_cli;
pub mod io_ops;
mod run;

pub use app_error::GcdmAppError;
pub use gcdm_cli::{GcdmCliArguments, GcdmOperation};
pub use run::{run_gcdm, run_qsi};
