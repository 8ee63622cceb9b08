//! The verification message handed to the mailer boundary.

use vouch_core::TokenValue;

pub const VERIFICATION_SUBJECT: &str = "Verify your email address";

/// Build the redemption URL the recipient clicks. The token travels as a
/// query parameter and never appears anywhere else.
pub fn verification_url(base_url: &str, token: &TokenValue) -> String {
    format!(
        "{}/verify-email?token={}",
        base_url.trim_end_matches('/'),
        token.as_str()
    )
}

pub fn verification_body(verification_url: &str) -> String {
    format!(
        "Welcome!\n\n\
         Please open the link below to verify your email address:\n\n\
         {verification_url}\n\n\
         This link is valid for 24 hours and can be used once. If you did not\n\
         create an account, you can ignore this message.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_contains_the_token_once() {
        let token = TokenValue::new();
        let url = verification_url("https://admin.example.com/", &token);
        assert_eq!(
            url,
            format!("https://admin.example.com/verify-email?token={}", token.as_str())
        );
    }

    #[test]
    fn body_embeds_the_url() {
        let body = verification_body("https://admin.example.com/verify-email?token=abc");
        assert!(body.contains("https://admin.example.com/verify-email?token=abc"));
        assert!(body.contains("24 hours"));
    }
}
