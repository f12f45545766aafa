// Moving batches in and out of files: ingredient CSV import, CSV and JSON export.

pub mod export;
pub mod import;

pub use export::*;
pub use import::*;
