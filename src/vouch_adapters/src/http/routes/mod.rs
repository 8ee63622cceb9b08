pub mod error;
pub mod login;
pub mod resend_verification;
pub mod signup;
pub mod status;
pub mod verify_email;

pub use error::AuthApiError;
pub use login::login;
pub use resend_verification::resend_verification;
pub use signup::signup;
pub use status::status;
pub use verify_email::verify_email;
