pub mod account;
pub mod article;
pub mod common;
pub mod cursor;
