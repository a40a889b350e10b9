//! Estimate what processing a token workload costs on each cloud provider.

pub mod app;
pub mod calculator;
pub mod chart;
pub mod config;
pub mod error;
pub mod keybindings;
pub mod logging;
pub mod parser;
pub mod rates;
pub mod report;
pub mod theme;
pub mod ui;
