pub mod config;
pub mod fetch;
pub mod league;
pub mod maprun;
pub mod output;
pub mod publisher;
