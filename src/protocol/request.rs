use serde::{Deserialize, Serialize};

/// Body of `POST /login` and `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Same credentials with the email blanked out.
    pub fn without_email(&self) -> Self {
        Self::new("", self.password.clone())
    }

    /// Same credentials with the password blanked out.
    pub fn without_password(&self) -> Self {
        Self::new(self.email.clone(), "")
    }
}

/// Body of `POST /users` and `PUT /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub job: String,
}

impl UserPayload {
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: job.into(),
        }
    }
}
