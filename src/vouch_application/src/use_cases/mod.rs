pub mod issue_verification;
pub mod login;
pub mod redeem_verification;
pub mod resend_verification;
pub mod signup;
