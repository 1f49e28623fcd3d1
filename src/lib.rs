pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod geo;
pub mod ids;
pub mod market;
pub mod middleware;
pub mod models;
pub mod persistence;
pub mod plans;
pub mod policy;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod verification;
