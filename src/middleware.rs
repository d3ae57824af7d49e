// src/middleware.rs
// Decoração das requisições de saída (token e idioma).

pub mod auth;
pub mod i18n;
