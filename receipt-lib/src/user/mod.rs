use actix_web::{web, Scope};

mod handlers;

/// Registration endpoint for the fronting identity layer. When signups are
/// disabled the route simply is not mounted.
pub fn auth_service(signups_enabled: bool) -> Scope {
    let scope = web::scope("/auth");
    if signups_enabled {
        scope.service(handlers::signup)
    } else {
        scope
    }
}

pub fn user_service() -> Scope {
    web::scope("/user").service(handlers::delete_user)
}
