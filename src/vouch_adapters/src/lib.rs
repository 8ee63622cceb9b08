pub mod clock;
pub mod config;
pub mod email;
pub mod http;
pub mod password;
pub mod persistence;

pub use clock::SystemClock;
pub use email::{MockEmailClient, PostmarkEmailClient};
pub use password::Argon2Scheme;
pub use persistence::{
    HashMapUserStore, HashMapVerificationTokenStore, PostgresUserStore,
    PostgresVerificationTokenStore,
};
