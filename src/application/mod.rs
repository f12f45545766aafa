// Application layer - the batch session every client (CLI, shell) drives.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
