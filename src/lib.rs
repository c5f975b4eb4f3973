//! registrar - course, student and enrollment records over HTTP

pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod records;
