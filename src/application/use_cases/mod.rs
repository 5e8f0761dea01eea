pub mod detector;
pub mod expiry;
pub mod gateway;
pub mod history;
pub mod key_store;
pub mod session;
pub mod snapshot;
pub mod sync;
