mod device_token;
mod notification_lock;
mod subscription;
mod topic;
mod topic_message;

pub use device_token::*;
pub use notification_lock::*;
pub use subscription::*;
pub use topic::*;
pub use topic_message::*;
