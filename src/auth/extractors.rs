use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;

/// Path parameter that, when present, must name the authenticated account.
pub const ACCOUNT_ID_PARAM: &str = "account_id";

/// The account a request was authenticated as.
///
/// Inserted into request extensions by `AuthMiddleware` and extracted by handlers,
/// which pass it on explicitly to the service layer. Extraction fails with
/// `AppError::Unauthorized` when the middleware did not run, or when the route
/// carries an `{account_id}` segment naming a different account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAccount(pub Uuid);

impl AuthenticatedAccount {
    pub fn id(&self) -> Uuid {
        self.0
    }

    /// Checks an `{account_id}` path value against this identity.
    pub fn ensure_matches(&self, path_account_id: Option<&str>) -> Result<(), AppError> {
        match path_account_id {
            None => Ok(()),
            Some(raw) if Uuid::parse_str(raw).ok() == Some(self.0) => Ok(()),
            Some(_) => Err(AppError::Unauthorized("Unauthorized access.".into())),
        }
    }
}

impl FromRequest for AuthenticatedAccount {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let account = req.extensions().get::<AuthenticatedAccount>().copied();
        let result = match account {
            Some(account) => account
                .ensure_matches(req.match_info().get(ACCOUNT_ID_PARAM))
                .map(|_| account),
            None => Err(AppError::Unauthorized(
                "Account not found in request. Ensure AuthMiddleware is active.".to_string(),
            )),
        };
        ready(result.map_err(Into::into))
    }
}
