//! Like counter service behind a personal portfolio and blog.
//!
//! The server keeps one counter per post in redis (`post:likes:<slug>`), readable through
//! a short lived cache and only ever changed with atomic `INCRBY`. The [`client`] module
//! holds the browser side logic: clicks are counted optimistically, capped per session and
//! sent as a single increment once the visitor stops clicking.

pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod resources;
pub mod tasks;
pub mod utils;
