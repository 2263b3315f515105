//! The subscriber/subscription halves of the channel-discovery protocol.

mod subscriber;
mod subscription;

pub use subscriber::Subscriber;
pub use subscription::Subscription;
