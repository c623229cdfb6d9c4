use crate::error::AppError;
use crate::utils::signature::verify_signature;
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http_body_util::BodyExt;
use secrecy::{ExposeSecret, Secret};

/// Header carrying the platform's callback signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

#[derive(Clone)]
pub struct SignatureConfig {
    pub channel_secret: Secret<String>,
}

/// Verifies the callback signature over the raw request body before the
/// handler runs. Requests without a valid signature never reach the handler.
pub async fn signature_validation_middleware<S>(
    State(state): State<S>,
    req: Request,
    next: Next,
) -> Result<Response, AppError>
where
    S: AsRef<SignatureConfig> + Clone + Send + Sync + 'static,
{
    let config = state.as_ref();

    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            AppError::AuthError(anyhow::anyhow!("Missing header: {}", SIGNATURE_HEADER))
        })?;

    let (parts, body) = req.into_parts();
    let bytes = body
        .collect()
        .await
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to read body: {}", e)))?
        .to_bytes();

    let is_valid = verify_signature(config.channel_secret.expose_secret(), &bytes, &signature)
        .map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Signature verification error: {}", e))
        })?;

    if !is_valid {
        return Err(AppError::AuthError(anyhow::anyhow!("Invalid signature")));
    }

    let req = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(req).await)
}
