pub mod objects;
pub mod order_flow_api;

pub use objects::{CallbackResolution, GatewayCallback};
pub use order_flow_api::OrderFlowApi;
