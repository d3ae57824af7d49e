// src/models/validation.rs
// Validações customizadas usadas pelos formulários (via `#[validate(custom(...))]`).
// Os códigos dos erros são traduzidos em `Message::from_code`.

use validator::{ValidateEmail, ValidateIp, ValidateUrl, ValidationError};

/// Obrigatório: não pode ficar vazio depois do trim.
pub fn required_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// E-mail opcional: vazio passa, preenchido precisa ser válido.
pub fn optional_email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_email() {
        return Ok(());
    }
    Err(ValidationError::new("email"))
}

/// URL opcional: vazio passa, preenchido precisa ser uma URL absoluta.
pub fn optional_url(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_url() {
        return Ok(());
    }
    Err(ValidationError::new("url"))
}

pub fn optional_ip(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_ip() {
        return Ok(());
    }
    Err(ValidationError::new("ip"))
}

/// Lista de destinatários: todos precisam ser e-mails válidos.
pub fn email_list(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().all(|v| v.trim().validate_email()) {
        return Ok(());
    }
    Err(ValidationError::new("email"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_whitespace() {
        assert!(required_text("   ").is_err());
        assert!(required_text(" IT ").is_ok());
    }

    #[test]
    fn optional_formats_accept_blank() {
        assert!(optional_email("").is_ok());
        assert!(optional_email(" info@dell.com ").is_ok());
        assert_eq!(optional_email("kein-email").unwrap_err().code, "email");

        assert!(optional_url("  ").is_ok());
        assert!(optional_url("https://www.dell.com").is_ok());
        assert_eq!(optional_url("dell.com").unwrap_err().code, "url");

        assert!(optional_ip("10.0.0.1").is_ok());
        assert!(optional_ip("10.0.0.300").is_err());
    }

    #[test]
    fn email_list_checks_every_entry() {
        assert!(email_list(&["a@b.de".into(), "c@d.de".into()]).is_ok());
        assert!(email_list(&["a@b.de".into(), "nope".into()]).is_err());
        assert!(email_list(&[]).is_ok());
    }
}
