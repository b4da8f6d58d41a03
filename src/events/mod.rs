//! Event system for result lifecycle notifications

pub mod publisher;

pub use publisher::{EventPublisher, PublishError, PublishedEvent};
