#![deny(unsafe_code)]

pub mod auth;
pub mod http;
pub mod sms;
pub mod storage;
