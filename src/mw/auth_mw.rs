use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info};

use crate::{
    auth::{models::Subject, token::verify_token},
    config::config::CONFIG,
    server::error::ServerError,
};

pub async fn auth_mw(mut req: Request<Body>, next: Next) -> Result<Response, ServerError> {
    let Some(auth_header) = extract_header(AUTHORIZATION.as_str(), req.headers()) else {
        info!("Missing authorization header on {}", req.uri().path());
        return Err(ServerError::LoginRequired);
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return Err(ServerError::JwtVerification(
            "Authorization header is not a bearer token".into(),
        ));
    };

    let claims = verify_token(token, &CONFIG.auth.jwt_secret)?;
    let subject = Subject::from(claims);
    debug!("Request by subject: {:?}", subject);
    req.extensions_mut().insert(subject);

    Ok(next.run(req).await)
}

fn extract_header(key: &str, header_map: &HeaderMap) -> Option<String> {
    header_map
        .get(key)
        .and_then(|header| header.to_str().ok())
        .map(|s| s.to_owned())
}
