pub mod config;
pub mod correct;
pub mod decompose;
