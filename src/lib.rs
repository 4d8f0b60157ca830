pub mod chat;
pub mod config;
pub mod corpus;
pub mod error;
pub mod keywords;
pub mod models;
pub mod notify;
pub mod openrouter;
pub mod retrieval;
pub mod server;

#[cfg(test)]
mod testing;

pub use config::AppConfig;
pub use corpus::Corpus;
pub use error::RetrievalError;
pub use server::run_server;
