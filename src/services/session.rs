use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::database::models::macros::string_enum;
use crate::error::AppError;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum UserRole {
        Admin => "admin",
        User => "user",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user id
    pub email: String,
    pub company_id: Option<Uuid>,
    pub role: UserRole,
    pub exp: usize, // expiration time
}

/// Signs a bearer token for the given user. Sign-in flows live elsewhere.
pub fn issue_token(
    config: &Config,
    user_id: Uuid,
    email: &str,
    company_id: Option<Uuid>,
    role: UserRole,
) -> Result<String> {
    let expiration = Utc::now() + Duration::days(config.jwt_expiration_days);

    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        company_id,
        role,
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )?;

    Ok(token)
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(token_data.claims)
}

/// The authenticated caller, handed to every handler that needs access checks.
#[derive(Debug, Clone)]
pub struct Session {
    claims: Claims,
}

impl Session {
    pub fn new(claims: Claims) -> Self {
        Self { claims }
    }

    pub fn user_id(&self) -> Uuid {
        self.claims.sub
    }

    pub fn is_admin(&self) -> bool {
        self.claims.role == UserRole::Admin
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(
                "Administrator role required".to_string(),
            ))
        }
    }

    /// Company filter to apply for a request that optionally names one.
    ///
    /// Admins get what they asked for (`None` meaning every company). Other
    /// users are pinned to their own company.
    pub fn company_scope(&self, requested: Option<Uuid>) -> Result<Option<Uuid>, AppError> {
        if self.is_admin() {
            return Ok(requested);
        }

        let own = self.claims.company_id.ok_or_else(|| {
            AppError::PermissionDenied("No company assigned to this user".to_string())
        })?;

        match requested {
            Some(company_id) if company_id != own => Err(AppError::PermissionDenied(
                "Cannot access another company".to_string(),
            )),
            _ => Ok(Some(own)),
        }
    }

    pub fn ensure_company_access(&self, company_id: Uuid) -> Result<(), AppError> {
        self.company_scope(Some(company_id)).map(|_| ())
    }
}

impl FromRequest for Session {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|header| header.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let Some(token) = token else {
            return ready(Err(AppError::Unauthorized));
        };

        let Some(config) = req.app_data::<Data<Config>>() else {
            log::error!("Config missing from app data, cannot verify token");
            return ready(Err(AppError::internal_server_error()));
        };

        match decode_token(token, &config.jwt_secret) {
            Ok(claims) => ready(Ok(Session::new(claims))),
            Err(err) => {
                log::warn!("Rejected bearer token: {}", err);
                ready(Err(AppError::Unauthorized))
            }
        }
    }
}
