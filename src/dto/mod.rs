pub mod auth;
pub mod catalog;
pub mod chat;
pub mod orders;
pub mod plans;
pub mod products;
pub mod shops;
