use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Gate mutating routes behind the shared admin token. A missing or
/// mismatched Authorization header is rejected with 403.
pub async fn require_admin(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    match auth {
        Some(TypedHeader(auth)) if auth.token() == state.config.admin_token => {
            Ok(next.run(request).await)
        }
        _ => Err(AppError::Unauthorized),
    }
}
