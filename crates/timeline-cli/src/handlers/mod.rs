pub mod replay;
pub mod tokens;
pub mod views;
