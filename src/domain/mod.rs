mod calculator;
mod ingredient;
mod ledger;
mod money;

pub use calculator::*;
pub use ingredient::*;
pub use ledger::*;
pub use money::*;
