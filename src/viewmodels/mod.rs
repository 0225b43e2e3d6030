// ============================================================================
// VIEWMODELS - ESTADO DE UI PURO
// ============================================================================
// Sin navegador ni HTTP: validación, transiciones y cuerpos de request.
// Los componentes los usan y los tests los ejercitan en nativo.
// ============================================================================

pub mod navigation;
pub mod login;
pub mod quick_resolve;
pub mod ticket;
pub mod reship;
pub mod refund;
pub mod incoming;

pub use navigation::{NavAction, NavState, Screen, Tab};
pub use login::LoginForm;
pub use quick_resolve::{QuickResolve, ResolveStep};
pub use reship::ReshipForm;
pub use refund::RefundForm;
pub use incoming::{IncomingAction, IncomingSlot};

use thiserror::Error;

/// Validación en cliente: bloquea el envío, no llega a haber request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("email and password are required")]
    MissingCredentials,
    #[error("search needs at least {0} characters")]
    QueryTooShort(usize),
    #[error("message is empty")]
    EmptyMessage,
    #[error("select at least one item")]
    NoItemsSelected,
    #[error("select a reason")]
    MissingReason,
    #[error("request already in progress")]
    Busy,
}

/// Query de búsqueda recortada, o error si es demasiado corta
pub fn validate_search(query: &str) -> Result<String, FormError> {
    let trimmed = query.trim();
    if trimmed.chars().count() < crate::utils::MIN_SEARCH_LEN {
        return Err(FormError::QueryTooShort(crate::utils::MIN_SEARCH_LEN));
    }
    Ok(trimmed.to_string())
}

/// Notas opcionales: vacías o solo espacios no se envían
pub(crate) fn optional_notes(notes: &str) -> Option<String> {
    let trimmed = notes.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_requires_two_trimmed_chars() {
        assert_eq!(validate_search("  a "), Err(FormError::QueryTooShort(2)));
        assert_eq!(validate_search(""), Err(FormError::QueryTooShort(2)));
        assert_eq!(validate_search(" ann ").as_deref(), Ok("ann"));
        assert_eq!(validate_search("#1").as_deref(), Ok("#1"));
    }

    #[test]
    fn notes_are_trimmed_or_omitted() {
        assert_eq!(optional_notes("   "), None);
        assert_eq!(optional_notes(" box crushed \n").as_deref(), Some("box crushed"));
    }
}
