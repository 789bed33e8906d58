//! Face Report CLI
//!
//! 解析サービスに写真を送り、スコアと要約をターミナルに表示する

pub mod analyze;
pub mod cli;
pub mod config;
pub mod error;
pub mod transport;
