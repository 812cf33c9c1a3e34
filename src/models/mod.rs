mod account;
mod deal;
mod organization;

pub use account::*;
pub use deal::*;
pub use organization::*;
