pub mod api;
pub mod bus;
pub mod session;
pub mod store;
