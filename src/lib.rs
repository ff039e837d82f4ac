#![allow(clippy::enum_variant_names)]

pub mod application;
pub mod apps;
pub mod cli;
pub mod config;
pub mod filesystem;
pub mod storage;
