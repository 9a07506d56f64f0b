//! Query modules for the fuel futures SDK.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and exposes methods
//! returning typed `Result<T>` payloads.

pub mod analysis;
pub mod prices;
pub mod tickers;

pub use analysis::AnalysisQuery;
pub use prices::PriceQuery;
pub use tickers::TickerQuery;
