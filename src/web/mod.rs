//! Server-rendered dashboard pages

pub mod handlers;
