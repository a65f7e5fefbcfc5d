pub mod notification;
pub mod post;
