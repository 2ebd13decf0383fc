//! WCC CMS - Content management backend for the community platform
//!
//! This library provides page lookup, event listing and the REST API
//! serving them.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
