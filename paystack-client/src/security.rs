//! Webhook signature computation and verification.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

type HmacSha512 = Hmac<Sha512>;

/// Signs a webhook payload using HMAC-SHA512, hex encoded.
pub fn sign_webhook(payload: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a webhook signature using constant-time comparison.
pub fn verify_webhook_signature(payload: &[u8], signature: &str, secret: &str) -> bool {
    let expected = sign_webhook(payload, secret);
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "sk_test_5d8a9f0c";

    #[test]
    fn test_webhook_signing() {
        let payload = br#"{"event":"charge.success","data":{"id":1}}"#;

        let signature = sign_webhook(payload, SECRET);
        assert_eq!(signature.len(), 128);
        assert!(verify_webhook_signature(payload, &signature, SECRET));
        assert!(!verify_webhook_signature(payload, &signature, "sk_test_other"));
    }

    #[test]
    fn test_single_byte_payload_mutation_fails() {
        let payload = br#"{"event":"transfer.success"}"#.to_vec();
        let signature = sign_webhook(&payload, SECRET);

        for i in 0..payload.len() {
            let mut tampered = payload.clone();
            tampered[i] ^= 0x01;
            assert!(!verify_webhook_signature(&tampered, &signature, SECRET));
        }
    }

    #[test]
    fn test_single_byte_signature_mutation_fails() {
        let payload = b"{}";
        let signature = sign_webhook(payload, SECRET);

        for i in 0..signature.len() {
            let mut tampered = signature.clone().into_bytes();
            tampered[i] = if tampered[i] == b'0' { b'1' } else { b'0' };
            let tampered = String::from_utf8(tampered).unwrap();
            assert!(!verify_webhook_signature(payload, &tampered, SECRET));
        }
    }

    #[test]
    fn test_signature_is_case_sensitive() {
        let payload = b"{}";
        let signature = sign_webhook(payload, SECRET).to_uppercase();
        assert!(!verify_webhook_signature(payload, &signature, SECRET));
        assert!(!verify_webhook_signature(payload, "", SECRET));
    }
}
