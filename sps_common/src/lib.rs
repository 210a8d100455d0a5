mod money;
mod secret;

pub mod helpers;

pub use money::{Rupees, RupeesConversionError};
pub use secret::Secret;
