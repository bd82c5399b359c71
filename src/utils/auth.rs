use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use color_eyre::eyre::{eyre, Context, ContextCompat, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::{AdminId, Member, MemberAPIError, MemberId};

use super::constants::{JWT_COOKIE_NAME, JWT_SECRET};

// This value determines how long the JWT auth token is valid for
pub const TOKEN_TTL_SECONDS: i64 = 172_800; // 2 days

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub admin_id: String,
    pub role: Role,
    pub exp: usize,
}

// Create cookie with a new JWT auth token for a logged-in member
#[tracing::instrument(name = "Generating member auth cookie", skip_all)]
pub fn generate_member_auth_cookie(member: &Member) -> Result<Cookie<'static>> {
    let token = generate_member_auth_token(member)?;
    Ok(create_auth_cookie(token))
}

#[tracing::instrument(name = "Generating member auth token", skip_all)]
pub fn generate_member_auth_token(member: &Member) -> Result<Secret<String>> {
    let claims = build_claims(
        member.id.as_ref().to_string(),
        member.admin_id.as_ref().to_string(),
        Role::Member,
    )?;
    create_token(&claims)
}

// Admin credentials are issued by the admin account surface; this helper is
// shared with it and with the test suite.
#[tracing::instrument(name = "Generating admin auth cookie", skip_all)]
pub fn generate_admin_auth_cookie(
    admin_id: &AdminId,
) -> Result<Cookie<'static>> {
    let claims = build_claims(
        admin_id.as_ref().to_string(),
        admin_id.as_ref().to_string(),
        Role::Admin,
    )?;
    let token = create_token(&claims)?;
    Ok(create_auth_cookie(token))
}

// Create cookie and set the value to the passed-in token string
#[tracing::instrument(name = "Creating auth cookie", skip_all)]
pub fn create_auth_cookie(token: Secret<String>) -> Cookie<'static> {
    Cookie::build((JWT_COOKIE_NAME, token.expose_secret().to_owned()))
        .path("/") // apply cookie to all URLs on the server
        .http_only(true) // prevent JavaScript from accessing the cookie
        .same_site(SameSite::Lax) // send cookie with "same-site" requests, and with "cross-site" top-level navigations.
        .build()
}

fn build_claims(sub: String, admin_id: String, role: Role) -> Result<Claims> {
    let delta = chrono::Duration::try_seconds(TOKEN_TTL_SECONDS)
        .wrap_err("Failed to create 2 day time delta")?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(eyre!("failed to add to current time"))?
        .timestamp();

    let exp: usize = exp.try_into().wrap_err(format!(
        "failed to cast exp time to usize. exp time: {}",
        exp
    ))?;

    Ok(Claims {
        sub,
        admin_id,
        role,
        exp,
    })
}

// Check if JWT auth token is valid by decoding it using the JWT secret
#[tracing::instrument(name = "Validating auth token", skip_all)]
pub fn validate_token(token: &Secret<String>) -> Result<Claims> {
    decode::<Claims>(
        token.expose_secret(),
        &DecodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .wrap_err("failed to decode token")
}

// Create JWT auth token by encoding claims using the JWT secret
#[tracing::instrument(name = "Creating auth token", skip_all)]
fn create_token(claims: &Claims) -> Result<Secret<String>> {
    let token_string = encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
    )
    .wrap_err("failed to create token")?;

    Ok(Secret::new(token_string))
}

fn claims_from_jar(jar: &CookieJar) -> Result<Claims, MemberAPIError> {
    let cookie = jar
        .get(JWT_COOKIE_NAME)
        .ok_or(MemberAPIError::MissingToken)?;
    let token = Secret::new(cookie.value().to_owned());
    validate_token(&token).map_err(|_| MemberAPIError::InvalidToken)
}

/// Extracts the acting member's identity from the request cookie. Fails
/// `Forbidden` for credentials carrying the admin role.
pub fn member_identity(
    jar: &CookieJar,
) -> Result<(MemberId, AdminId), MemberAPIError> {
    let claims = claims_from_jar(jar)?;

    if claims.role != Role::Member {
        return Err(MemberAPIError::Forbidden);
    }

    let member_id = MemberId::parse(&claims.sub)
        .map_err(|_| MemberAPIError::InvalidToken)?;
    let admin_id = AdminId::parse(&claims.admin_id)
        .map_err(|_| MemberAPIError::InvalidToken)?;

    Ok((member_id, admin_id))
}

/// Extracts the acting admin's identity from the request cookie. Fails
/// `Forbidden` for credentials carrying the member role.
pub fn admin_identity(jar: &CookieJar) -> Result<AdminId, MemberAPIError> {
    let claims = claims_from_jar(jar)?;

    if claims.role != Role::Admin {
        return Err(MemberAPIError::Forbidden);
    }

    AdminId::parse(&claims.sub).map_err(|_| MemberAPIError::InvalidToken)
}
