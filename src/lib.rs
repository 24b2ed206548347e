pub mod adapter;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod messages;
pub mod output;
pub mod present;
pub mod render;

#[cfg(test)]
mod tests;
