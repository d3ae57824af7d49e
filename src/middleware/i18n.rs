// src/middleware/i18n.rs

use reqwest::header::{ACCEPT_LANGUAGE, HeaderValue};
use reqwest::RequestBuilder;

const DEFAULT_LANG: &str = "de";
const SUPPORTED_LANGS: &[&str] = &["de", "en"];

/// Idioma usado nas mensagens da interface e enviado à API no `Accept-Language`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Locale {
    /// Interpreta uma string no formato do cabeçalho `Accept-Language`
    /// ("en-US,en;q=0.9"). Idiomas sem catálogo caem no alemão.
    pub fn parse(header_str: &str) -> Self {
        let lang = accept_language::parse(header_str)
            .into_iter()
            // "pt-BR" -> "pt", "en" -> "en"
            .map(|tag| tag.split('-').next().unwrap_or_default().to_lowercase())
            .find(|lang| SUPPORTED_LANGS.contains(&lang.as_str()))
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        Locale(lang)
    }

    pub fn is_english(&self) -> bool {
        self.0 == "en"
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

/// Anexa o idioma atual à requisição de saída.
pub fn attach_locale(request: RequestBuilder, locale: &Locale) -> RequestBuilder {
    match HeaderValue::from_str(&locale.0) {
        Ok(value) => request.header(ACCEPT_LANGUAGE, value),
        Err(_) => request,
    }
}
