use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

use crate::attendance::SessionRegistry;
use crate::error::AppError;
use crate::model::{User, UserId};

/// Header carrying the identity resolved by the upstream gateway.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The directory entry of the caller.
pub struct SessionUser {
    pub user: User,
}

impl FromRequest for SessionUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user_id = match req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            Some(id) => UserId::from(id),
            None => {
                return ready(Err(AppError::Unauthorized(format!(
                    "Missing {USER_ID_HEADER} header"
                ))));
            }
        };

        let registry = match req.app_data::<Data<SessionRegistry>>() {
            Some(r) => r,
            None => {
                return ready(Err(AppError::Internal(
                    "Session registry missing".to_string(),
                )));
            }
        };

        match registry.directory().find_user(&user_id) {
            Some(user) => ready(Ok(SessionUser { user: user.clone() })),
            None => ready(Err(AppError::Unauthorized(format!(
                "Unknown user {user_id}"
            )))),
        }
    }
}

impl SessionUser {
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.user.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin only".to_string()))
        }
    }
}
