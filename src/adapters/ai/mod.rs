//! Augmentation gateway adapters.

mod http_gateway;
mod mock_gateway;

pub use http_gateway::{GatewayClientConfig, HttpAugmentationGateway};
pub use mock_gateway::{GatewayCall, MockAugmentationGateway};
