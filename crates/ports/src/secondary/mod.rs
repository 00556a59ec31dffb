pub mod alert_store;
pub mod auth_provider;
pub mod metrics_port;
pub mod sms_transport;
