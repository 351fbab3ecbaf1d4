mod bank;
pub use bank::*;
mod error;
pub use error::ExtractError;
pub mod objects;
pub mod reader;
pub mod structs;
