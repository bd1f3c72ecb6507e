pub mod request;
pub mod response;

pub use request::{Credentials, UserPayload};
pub use response::{
    CreatedUser, ErrorBody, Outcome, Page, Registration, Resource, Single, Support, Token,
    UpdatedUser, User,
};
