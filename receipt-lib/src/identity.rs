use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{HttpMessage, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};

/// The authenticated user's id, as established by the identity layer in
/// front of the service. Handlers receive it via `web::ReqData<UserId>`.
pub type UserId = i32;

/// Header set by the fronting identity/session layer after it has
/// authenticated the request. The service trusts this value and does no
/// authentication of its own.
pub const AUTH_USER_HEADER: &str = "x-auth-user";

/// Rejects requests that arrive without an authenticated user id and exposes
/// the id to handlers through request extensions.
pub struct IdentityRequired;

impl<S, B> Transform<S, ServiceRequest> for IdentityRequired
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Transform = IdentityMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IdentityMiddleware { service }))
    }
}

pub struct IdentityMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for IdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let user_id = req
            .headers()
            .get(AUTH_USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<UserId>().ok());

        let Some(user_id) = user_id else {
            let (req, _) = req.into_parts();
            let response = HttpResponse::Unauthorized().finish().map_into_right_body();
            return Box::pin(ready(Ok(ServiceResponse::new(req, response))));
        };

        req.extensions_mut().insert::<UserId>(user_id);
        let fut = self.service.call(req);
        Box::pin(async move {
            tracing::Span::current().record("user_id", user_id);
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}
