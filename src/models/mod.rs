pub mod account_settings;
pub mod efficiency;
pub mod error;
pub mod heat_pump;
