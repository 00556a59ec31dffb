pub mod http_transport;
pub mod log_transport;
