use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::{auth_session, prelude::*, sea_orm_active_enums::Role};
use crate::error::AppError;
use crate::router::AppState;

/// The authenticated caller, resolved from the bearer token before the
/// handler runs.
pub struct CurrentUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Role allow-list gate, applied per route.
    pub fn require_role(&self, permitted: &[Role]) -> Result<(), AppError> {
        if permitted.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::Unauthenticated)?;

        let session = AuthSession::find()
            .filter(auth_session::Column::Token.eq(bearer.token()))
            .one(&state.db)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        if session.expires_at < Utc::now().naive_utc() {
            return Err(AppError::Unauthenticated);
        }

        let user = User::find_by_id(session.user_id)
            .one(&state.db)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        Ok(Self {
            user_id: user.id,
            role: user.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_passes_the_admin_gate() {
        let caller = CurrentUser {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
        };
        assert!(caller.require_role(&[Role::Admin]).is_ok());
        assert!(caller.is_admin());
    }

    #[test]
    fn renter_is_rejected_from_admin_routes() {
        let caller = CurrentUser {
            user_id: Uuid::new_v4(),
            role: Role::Renter,
        };
        assert!(matches!(
            caller.require_role(&[Role::Admin]),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn allow_list_accepts_any_listed_role() {
        let caller = CurrentUser {
            user_id: Uuid::new_v4(),
            role: Role::Host,
        };
        assert!(caller.require_role(&[Role::Host, Role::Admin]).is_ok());
        assert!(caller.require_role(&[Role::Renter, Role::Admin]).is_err());
    }
}
