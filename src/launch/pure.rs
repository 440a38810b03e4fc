pub mod command;
pub mod resolve;
