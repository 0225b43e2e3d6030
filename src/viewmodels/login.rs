use super::FormError;
use crate::models::LoginRequest;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Email en minúsculas; ambos campos obligatorios
    pub fn request(&self) -> Result<LoginRequest, FormError> {
        let email = self.email.trim().to_lowercase();
        if email.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingCredentials);
        }
        Ok(LoginRequest {
            email,
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_lowercased() {
        let form = LoginForm {
            email: " Dana@PioneerFeeders.com ".into(),
            password: "hunter2".into(),
        };
        let request = form.request().unwrap();
        assert_eq!(request.email, "dana@pioneerfeeders.com");
        assert_eq!(request.password, "hunter2");
    }

    #[test]
    fn blank_fields_block_submission() {
        let form = LoginForm {
            email: "   ".into(),
            password: "x".into(),
        };
        assert_eq!(form.request(), Err(FormError::MissingCredentials));

        let form = LoginForm {
            email: "a@b.c".into(),
            password: String::new(),
        };
        assert_eq!(form.request(), Err(FormError::MissingCredentials));
    }
}
