pub mod config;
pub mod harvest;
pub mod jsonl;
pub mod logging;
pub mod split;
