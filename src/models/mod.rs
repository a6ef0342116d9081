pub mod alert;
pub mod market;
pub mod user_data;

pub use alert::{Alert, AlertDirection};
pub use market::MarketSnapshot;
pub use user_data::{Preferences, RiskTolerance, UserData};
