pub mod buy_ticket;
pub mod claim;
pub mod close_lottery;
pub mod fulfill_randomness;
pub mod initialize_config;
pub mod open_lottery;
pub mod shared;
pub mod start_lottery;

pub use buy_ticket::*;
pub use claim::*;
pub use close_lottery::*;
pub use fulfill_randomness::*;
pub use initialize_config::*;
pub use open_lottery::*;
pub use shared::*;
pub use start_lottery::*;
