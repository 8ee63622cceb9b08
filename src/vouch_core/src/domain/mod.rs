pub mod account;
pub mod email;
pub mod password;
pub mod verification_token;
