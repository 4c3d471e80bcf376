pub mod commands;
pub mod contracts;
pub mod error;
pub mod normalize;
pub mod schedule;

pub use contracts::envelope::{CommandName, ErrorContract, FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult, ScheduleError, ValidationError};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
