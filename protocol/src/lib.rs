//! Common types shared between the carveout rule tables, the interception
//! engine and the CLI.

pub mod event;
pub mod value;

pub use event::*;
pub use value::*;
