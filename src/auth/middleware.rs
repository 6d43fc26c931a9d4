use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderValue},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::extractors::AuthenticatedAccount;
use crate::auth::token::JwtKeys;
use crate::error::AppError;

lazy_static! {
    // Exactly one space between scheme and a non-empty token.
    static ref BEARER_HEADER_REGEX: Regex = Regex::new(r"^Bearer ([^\s]+)$").unwrap();
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn parse_bearer_header(value: &HeaderValue) -> Result<&str, AppError> {
    let invalid = || AppError::InvalidAuthorizationHeader("Invalid authorization header.".into());

    let value = value.to_str().map_err(|_| invalid())?;
    BEARER_HEADER_REGEX
        .captures(value)
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str())
        .ok_or_else(invalid)
}

/// Resolves the account behind a request, or the reason it has none.
fn authenticate(keys: &JwtKeys, req: &ServiceRequest) -> Result<AuthenticatedAccount, AppError> {
    let value = req.headers().get(header::AUTHORIZATION).ok_or_else(|| {
        AppError::AuthorizationHeaderMissing("Authorization header is missing.".into())
    })?;
    let token = parse_bearer_header(value)?;
    let claims = keys.verify_token(token)?;
    Ok(AuthenticatedAccount(claims.sub))
}

/// Rejects requests without a valid bearer token.
///
/// On success the resolved `AuthenticatedAccount` is stored in the request
/// extensions for the extractor of the same name. Whether the account may act on
/// the addressed path is decided by that extractor, once routing has resolved
/// every path parameter.
pub struct AuthMiddleware {
    keys: JwtKeys,
}

impl AuthMiddleware {
    pub fn new(keys: JwtKeys) -> Self {
        Self { keys }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            keys: self.keys.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    keys: JwtKeys,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&self.keys, &req) {
            Ok(account) => {
                req.extensions_mut().insert(account);
                Box::pin(self.service.call(req))
            }
            Err(app_err) => {
                log::debug!("rejected {} {}: {}", req.method(), req.path(), app_err);
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}
