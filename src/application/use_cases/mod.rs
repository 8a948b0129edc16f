mod send_notification;
mod subscription_trigger;

pub use send_notification::*;
pub use subscription_trigger::*;
