//! Line protocol spoken with the gateway

pub mod command;
pub mod status;

pub use command::{BlinkCommand, IntParser};
pub use status::{format_status, Reading, StatusLine};
