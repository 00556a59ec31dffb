#![forbid(unsafe_code)]

pub mod alert;
pub mod auth;
pub mod common;
