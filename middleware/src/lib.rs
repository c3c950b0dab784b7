#[cfg(feature = "latency")]
mod latency;
#[cfg(feature = "latency")]
pub use latency::latency_ms;

#[cfg(feature = "client-ip")]
mod client_ip;
#[cfg(feature = "client-ip")]
pub use client_ip::{ClientIp, mw_client_ip};

#[cfg(feature = "concurrency-limit")]
mod concurrency_limit;
#[cfg(feature = "concurrency-limit")]
pub use concurrency_limit::mw_concurrency_limit;
