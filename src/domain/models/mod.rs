pub mod booking;
pub mod guest;
pub mod money;
pub mod room;
