pub use config::*;
pub use lottery::*;
pub use randomness_request::*;
pub use ticket::*;

pub mod config;
pub mod lottery;
pub mod randomness_request;
pub mod ticket;
