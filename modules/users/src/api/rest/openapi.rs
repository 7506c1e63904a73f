use modkit::{FieldError, Problem};
use utoipa::OpenApi;

use crate::api::rest::{
    dto::{CreateUserReq, UpdateUserReq, UserDto},
    handlers,
};

/// OpenAPI document for the users resource.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_users,
        handlers::get_user,
        handlers::create_user,
        handlers::update_user,
        handlers::delete_user,
    ),
    components(schemas(UserDto, CreateUserReq, UpdateUserReq, Problem, FieldError)),
    tags((name = "users", description = "User directory management"))
)]
pub struct UsersApiDoc;
