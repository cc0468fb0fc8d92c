pub mod endpoints;
pub mod failover;

pub use endpoints::{EndpointHealth, RpcEndpoint, RPC_ENDPOINTS};
pub use failover::FailoverRpc;
