// src/lib.rs

pub mod api;
pub mod common;
pub mod config;
pub mod middleware;
pub mod models;
pub mod screens;
pub mod services;
