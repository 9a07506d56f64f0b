pub mod analysis;
pub mod price;

pub use analysis::*;
pub use price::*;
