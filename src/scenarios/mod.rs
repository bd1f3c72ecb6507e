//! The scenario catalogue.
//!
//! A scenario builds its inputs from [`Fixtures`], calls the
//! [`VerificationClient`] and asserts on the body it gets back. Scenarios
//! share nothing mutable and may run in any order.

pub mod auth;
pub mod resources;
pub mod users;

use std::fmt;

use serde::Serialize;

use crate::client::VerificationClient;
use crate::error::ContractError;
use crate::fixtures::Fixtures;
use crate::schema::SchemaSet;

/// Read-only state every scenario receives.
#[derive(Debug)]
pub struct ScenarioContext {
    pub client: VerificationClient,
    pub fixtures: Fixtures,
    pub schemas: SchemaSet,
}

impl ScenarioContext {
    pub fn new(client: VerificationClient, fixtures: Fixtures, schemas: SchemaSet) -> Self {
        Self {
            client,
            fixtures,
            schemas,
        }
    }
}

/// Resource area a scenario belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    Authentication,
    Resources,
    Users,
}

impl Group {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Resources => "resources",
            Self::Users => "users",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! catalogue {
    ($($variant:ident => $name:literal, $group:ident;)+) => {
        /// Every scenario the suite knows, in reporting order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Scenario {
            $($variant,)+
        }

        impl Scenario {
            pub const ALL: &'static [Scenario] = &[$(Scenario::$variant,)+];

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            pub fn group(self) -> Group {
                match self {
                    $(Self::$variant => Group::$group,)+
                }
            }
        }
    };
}

catalogue! {
    LoginReturnsToken => "login_returns_token", Authentication;
    LoginMatchesSchema => "login_matches_schema", Authentication;
    LoginUnknownUserRejected => "login_unknown_user_rejected", Authentication;
    LoginBlankEmailRejected => "login_blank_email_rejected", Authentication;
    LoginBlankPasswordRejected => "login_blank_password_rejected", Authentication;
    RegisterReturnsIdAndToken => "register_returns_id_and_token", Authentication;
    RegisterMatchesSchema => "register_matches_schema", Authentication;
    RegisterUndefinedUserRejected => "register_undefined_user_rejected", Authentication;
    RegisterBlankEmailRejected => "register_blank_email_rejected", Authentication;
    RegisterBlankPasswordRejected => "register_blank_password_rejected", Authentication;

    ResourcesMatchSchema => "resources_match_schema", Resources;
    ResourcesNotEmpty => "resources_not_empty", Resources;
    ResourcesHaveRequiredFields => "resources_have_required_fields", Resources;
    ResourcesFirstPage => "resources_first_page", Resources;
    ResourcesColorsAreHex => "resources_colors_are_hex", Resources;
    ResourcesIdsUnique => "resources_ids_unique", Resources;
    ResourcesFieldTypes => "resources_field_types", Resources;
    ResourceByIdMatchesFixture => "resource_by_id_matches_fixture", Resources;
    ResourceMissingReturnsNotFound => "resource_missing_returns_not_found", Resources;

    UsersMatchSchema => "users_match_schema", Users;
    UsersNotEmpty => "users_not_empty", Users;
    UsersHaveRequiredFields => "users_have_required_fields", Users;
    UsersEmailFormat => "users_email_format", Users;
    UsersAvatarFormat => "users_avatar_format", Users;
    UsersIdIsInteger => "users_id_is_integer", Users;
    UserByIdMatchesFixture => "user_by_id_matches_fixture", Users;
    CreateUserReturnsProperties => "create_user_returns_properties", Users;
    CreateUserMatchesSchema => "create_user_matches_schema", Users;
    CreateUserEchoesPayload => "create_user_echoes_payload", Users;
    CreateUserCreatedAtIsTimestamp => "create_user_created_at_is_timestamp", Users;
    UpdateUserEchoesPayload => "update_user_echoes_payload", Users;
    UpdateUserMatchesSchema => "update_user_matches_schema", Users;
    UpdateUserUpdatedAtIsTimestamp => "update_user_updated_at_is_timestamp", Users;
    DeleteUserReturnsNoContent => "delete_user_returns_no_content", Users;
    DeleteMissingUserReturnsNotFound => "delete_missing_user_returns_not_found", Users;
    DeleteMalformedUserReturnsNotFound => "delete_malformed_user_returns_not_found", Users;
}

impl Scenario {
    /// Case-sensitive substring match on name or group.
    pub fn matches_filter(self, filter: &str) -> bool {
        self.name().contains(filter) || self.group().as_str().contains(filter)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run one scenario to completion.
pub async fn run(scenario: Scenario, ctx: &ScenarioContext) -> Result<(), ContractError> {
    use self::Scenario::*;

    match scenario {
        LoginReturnsToken => auth::login_returns_token(ctx).await,
        LoginMatchesSchema => auth::login_matches_schema(ctx).await,
        LoginUnknownUserRejected => auth::login_unknown_user_rejected(ctx).await,
        LoginBlankEmailRejected => auth::login_blank_email_rejected(ctx).await,
        LoginBlankPasswordRejected => auth::login_blank_password_rejected(ctx).await,
        RegisterReturnsIdAndToken => auth::register_returns_id_and_token(ctx).await,
        RegisterMatchesSchema => auth::register_matches_schema(ctx).await,
        RegisterUndefinedUserRejected => auth::register_undefined_user_rejected(ctx).await,
        RegisterBlankEmailRejected => auth::register_blank_email_rejected(ctx).await,
        RegisterBlankPasswordRejected => auth::register_blank_password_rejected(ctx).await,

        ResourcesMatchSchema => resources::list_matches_schema(ctx).await,
        ResourcesNotEmpty => resources::list_not_empty(ctx).await,
        ResourcesHaveRequiredFields => resources::list_has_required_fields(ctx).await,
        ResourcesFirstPage => resources::list_is_first_page(ctx).await,
        ResourcesColorsAreHex => resources::colors_are_hex(ctx).await,
        ResourcesIdsUnique => resources::ids_unique(ctx).await,
        ResourcesFieldTypes => resources::field_types(ctx).await,
        ResourceByIdMatchesFixture => resources::by_id_matches_fixture(ctx).await,
        ResourceMissingReturnsNotFound => resources::missing_returns_not_found(ctx).await,

        UsersMatchSchema => users::list_matches_schema(ctx).await,
        UsersNotEmpty => users::list_not_empty(ctx).await,
        UsersHaveRequiredFields => users::list_has_required_fields(ctx).await,
        UsersEmailFormat => users::email_format(ctx).await,
        UsersAvatarFormat => users::avatar_format(ctx).await,
        UsersIdIsInteger => users::id_is_integer(ctx).await,
        UserByIdMatchesFixture => users::by_id_matches_fixture(ctx).await,
        CreateUserReturnsProperties => users::create_returns_properties(ctx).await,
        CreateUserMatchesSchema => users::create_matches_schema(ctx).await,
        CreateUserEchoesPayload => users::create_echoes_payload(ctx).await,
        CreateUserCreatedAtIsTimestamp => users::create_created_at_is_timestamp(ctx).await,
        UpdateUserEchoesPayload => users::update_echoes_payload(ctx).await,
        UpdateUserMatchesSchema => users::update_matches_schema(ctx).await,
        UpdateUserUpdatedAtIsTimestamp => users::update_updated_at_is_timestamp(ctx).await,
        DeleteUserReturnsNoContent => users::delete_returns_no_content(ctx).await,
        DeleteMissingUserReturnsNotFound => users::delete_missing_returns_not_found(ctx).await,
        DeleteMalformedUserReturnsNotFound => users::delete_malformed_returns_not_found(ctx).await,
    }
}
