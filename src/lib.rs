pub mod analyzers;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod menu;
pub mod output;
