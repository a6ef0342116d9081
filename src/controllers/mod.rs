pub mod alerts_controller;
pub mod market_controller;
pub mod menu_controller;
pub mod tips_controller;
