use serde::Deserialize;

/// Registration form body. Field names match the HTML form inputs.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub password: String,
    /// Confirmation copy of the password.
    pub password2: String,
    pub email: String,
}

/// Login form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub password: String,
}

/// Credentials a login attempt carries into the service layer; the user
/// agent comes off the request header, not the form.
#[derive(Debug)]
pub struct LoginAttempt {
    pub user_name: String,
    pub password: String,
    pub user_agent: String,
}

impl LoginAttempt {
    pub fn new(form: LoginForm, user_agent: impl Into<String>) -> Self {
        Self {
            user_name: form.user_name,
            password: form.password,
            user_agent: user_agent.into(),
        }
    }
}
