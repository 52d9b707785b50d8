//! Moderation record store and its HTTP handlers

pub mod handlers;
pub mod store;

pub use store::RecordStore;
