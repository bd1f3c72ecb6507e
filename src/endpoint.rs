//! Paths of the endpoints the suite exercises, relative to the base URL.

use std::fmt::Display;

pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const RESOURCES: &str = "/unknown";
pub const USERS: &str = "/users";

pub fn resource(id: impl Display) -> String {
    format!("{RESOURCES}/{id}")
}

pub fn users_page(page: u32) -> String {
    format!("{USERS}?page={page}")
}

pub fn user(id: impl Display) -> String {
    format!("{USERS}/{id}")
}
