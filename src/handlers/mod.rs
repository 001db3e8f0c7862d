pub mod auth;
pub mod chat;
pub mod crisis;
pub mod goals;
pub mod habits;
pub mod health;
pub mod journal;
pub mod meditation;
pub mod mood;
