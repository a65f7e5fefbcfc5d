pub mod feed;
pub mod likes;
pub mod notifications;
pub mod pagination;
pub mod posts;
