//! Inputs and expected values tied to the service's documented mock data.

use crate::protocol::{Credentials, Resource, User, UserPayload};

/// Error messages the service returns for rejected payloads.
#[derive(Debug, Clone)]
pub struct RejectionMessages {
    pub missing_email: String,
    pub missing_password: String,
    pub user_not_found: String,
    pub undefined_registration: String,
}

/// Fixture data handed to every scenario.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub login: Credentials,
    pub register: Credentials,
    pub unknown_login: Credentials,
    pub undefined_register: Credentials,
    pub messages: RejectionMessages,

    pub known_resource: Resource,
    pub missing_resource_id: u64,

    pub users_page: u32,
    pub known_user: User,

    pub new_user: UserPayload,
    pub updated_user: UserPayload,

    pub deletable_user_id: u64,
    pub missing_user_id: u64,
    pub malformed_user_id: String,
}

impl Fixtures {
    /// The records published by reqres.in.
    pub fn reqres() -> Self {
        Self {
            login: Credentials::new("eve.holt@reqres.in", "cityslicka"),
            register: Credentials::new("eve.holt@reqres.in", "pistol"),
            unknown_login: Credentials::new("invalid@email.com", "invalidpassword"),
            undefined_register: Credentials::new("invalidemail", "invalidpaswword"),
            messages: RejectionMessages {
                missing_email: "Missing email or username".into(),
                missing_password: "Missing password".into(),
                user_not_found: "user not found".into(),
                undefined_registration: "Note: Only defined users succeed registration".into(),
            },

            known_resource: Resource {
                id: 2,
                name: "fuchsia rose".into(),
                year: 2001,
                color: "#C74375".into(),
                pantone_value: "17-2031".into(),
            },
            missing_resource_id: 23,

            users_page: 2,
            known_user: User {
                id: 2,
                email: "janet.weaver@reqres.in".into(),
                first_name: "Janet".into(),
                last_name: "Weaver".into(),
                avatar: "https://reqres.in/img/faces/2-image.jpg".into(),
            },

            new_user: UserPayload::new("morpheus", "leader"),
            updated_user: UserPayload::new("morpheus", "zion resident"),

            deletable_user_id: 2,
            missing_user_id: 99,
            malformed_user_id: "invalid".into(),
        }
    }
}

impl Default for Fixtures {
    fn default() -> Self {
        Self::reqres()
    }
}
