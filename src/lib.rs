pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    DiagnosticSink, MessagingClient, NotificationLockRepository, SendNotificationUseCase,
    SubscriptionTrigger,
};

pub use connector::{
    ConsoleDiagnostics, DuckdbNotificationLockRepository, FcmConfig, FcmMessagingClient,
    InMemoryNotificationLockRepository, MemoryDiagnostics, MockMessagingClient,
};

pub use domain::{
    DeviceToken, DiagnosticMode, DomainError, Notification, NotificationLock,
    SubscriptionOutcome, Topic, TopicMessage, DEFAULT_TOPIC, NOTIFICATION_LOCK,
    SUBSCRIBED_MESSAGE,
};
