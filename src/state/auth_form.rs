//! Login/signup form state shared across the auth routes.
//!
//! DESIGN
//! ======
//! Provided as one context signal above the router so switching between
//! `/login` and `/signup` (which remounts the page) keeps typed values,
//! field errors, and the post-signup username prefill.

#[cfg(test)]
#[path = "auth_form_test.rs"]
mod auth_form_test;

/// Per-field validation errors. `None` means the field is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub username: Option<&'static str>,
    pub email: Option<&'static str>,
    pub phone: Option<&'static str>,
    pub password: Option<&'static str>,
    pub confirm_password: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
    }
}

/// All auth form inputs plus submit feedback.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthFormState {
    pub login_username: String,
    pub login_password: String,
    pub signup_username: String,
    pub signup_email: String,
    pub signup_phone: String,
    pub signup_password: String,
    pub signup_confirm_password: String,
    pub errors: FormErrors,
    pub submit_error: Option<String>,
    pub submit_success: Option<String>,
    pub submitting: bool,
}

impl AuthFormState {
    /// Drop field errors and submit feedback, keeping typed values.
    pub fn clear_feedback(&mut self) {
        self.errors = FormErrors::default();
        self.submit_error = None;
        self.submit_success = None;
    }
}
