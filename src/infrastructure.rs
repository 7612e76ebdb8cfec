// Infrastructure layer modules
pub mod config;
pub mod event_publisher;
pub mod logging;

// Re-exports
pub use config::{ConfigError, EventBusConfig};
pub use event_publisher::{AwsSnsEventPublisher, EventPublisher, PublishError};
pub use logging::init_logging;
