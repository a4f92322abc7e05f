pub mod chat;
pub mod repositories;
