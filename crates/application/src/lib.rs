#![forbid(unsafe_code)]

pub mod alert_dispatcher;
pub mod alert_intake_service;
pub mod sms_send_service;
