//! Rule evaluation engine: the validator, message formatting and batch runs

pub mod batch;
pub mod message;
pub mod validator;

pub use batch::{BatchResult, BatchValidator};
pub use message::{MessageTable, format_message};
pub use validator::{Failure, Outcome, Validator};
