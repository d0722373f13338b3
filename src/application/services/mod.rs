pub mod account_service;
pub mod article_service;
pub mod selection;
