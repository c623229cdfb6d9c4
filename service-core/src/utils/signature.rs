use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Generate the callback signature for a raw request body.
///
/// Format: base64(HMAC-SHA256(body, channel_secret))
pub fn generate_signature(secret: &str, body: &[u8]) -> Result<String, anyhow::Error> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("Invalid key length: {}", e))?;

    mac.update(body);
    let result = mac.finalize();

    Ok(BASE64.encode(result.into_bytes()))
}

/// Verify a callback signature using constant-time comparison.
pub fn verify_signature(secret: &str, body: &[u8], signature: &str) -> Result<bool, anyhow::Error> {
    let expected_signature = generate_signature(secret, body)?;

    let expected_bytes = expected_signature.as_bytes();
    let signature_bytes = signature.as_bytes();

    if expected_bytes.len() != signature_bytes.len() {
        return Ok(false);
    }

    Ok(expected_bytes.ct_eq(signature_bytes).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_generation_and_verification() {
        let secret = "my_channel_secret";
        let body = br#"{"events":[]}"#;

        let signature = generate_signature(secret, body).unwrap();
        assert!(!signature.is_empty());

        let is_valid = verify_signature(secret, body, &signature).unwrap();
        assert!(is_valid);
    }

    #[test]
    fn test_invalid_signature() {
        let secret = "my_channel_secret";
        let body = br#"{"events":[]}"#;

        let signature = generate_signature(secret, body).unwrap();
        let invalid_signature = format!("a{}", &signature[1..]);

        let is_valid = verify_signature(secret, body, &invalid_signature).unwrap();
        assert!(!is_valid);
    }

    #[test]
    fn test_tampered_body() {
        let secret = "my_channel_secret";
        let body = br#"{"events":[{"type":"message"}]}"#;

        let signature = generate_signature(secret, body).unwrap();

        let tampered_body = br#"{"events":[{"type":"follow"}]}"#;
        let is_valid = verify_signature(secret, tampered_body, &signature).unwrap();
        assert!(!is_valid);
    }

    #[test]
    fn test_wrong_secret() {
        let body = br#"{"events":[]}"#;

        let signature = generate_signature("secret_a", body).unwrap();
        let is_valid = verify_signature("secret_b", body, &signature).unwrap();
        assert!(!is_valid);
    }
}
