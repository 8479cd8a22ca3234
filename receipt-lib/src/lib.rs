#[macro_use]
extern crate actix_web;

pub mod catalog;
pub mod config;
mod error;
pub mod identity;
pub mod receipt;
pub mod report;
pub mod tracing;
pub mod user;
