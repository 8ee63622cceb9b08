pub mod use_cases;
pub mod verification_mail;

#[cfg(test)]
pub(crate) mod test_support;

pub use use_cases::{
    issue_verification::{IssueVerificationError, IssueVerificationUseCase},
    login::{LoginError, LoginUseCase},
    redeem_verification::{RedeemVerificationError, RedeemVerificationUseCase},
    resend_verification::{ResendVerificationError, ResendVerificationUseCase},
    signup::{SignupError, SignupUseCase},
};
