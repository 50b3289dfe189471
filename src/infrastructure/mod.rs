pub mod chart;
pub mod config;
pub mod csv;
pub mod excel;
