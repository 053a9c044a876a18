//! Fake Store CLI Library
//!
//! A shopping cart persisted to local storage, a client for the Fake Store
//! product catalog, and the storefront commands that tie them together.

pub mod cache;
pub mod cart;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod storage;
pub mod storefront;
