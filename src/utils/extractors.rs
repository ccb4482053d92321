use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::Principal,
    utils::jwt::Claims,
};

pub fn extract_principal(claims: &Claims) -> Result<Principal> {
    let id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AppError::Unauthorized("Unauthorized".to_string()))?;

    Ok(Principal {
        id,
        username: claims.username.clone(),
        role: claims.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    #[test]
    fn rejects_non_uuid_subject() {
        let claims = Claims {
            sub: "42".to_string(),
            username: "x".to_string(),
            role: UserRole::Buyer,
            exp: 0,
        };
        assert!(matches!(
            extract_principal(&claims),
            Err(AppError::Unauthorized(_))
        ));
    }
}
