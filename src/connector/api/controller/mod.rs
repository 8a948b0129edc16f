pub mod send_controller;
pub mod subscribe_controller;

pub use send_controller::SendController;
pub use subscribe_controller::SubscribeController;
