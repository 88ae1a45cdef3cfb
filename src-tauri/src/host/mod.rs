pub mod cmd;
pub mod control;
