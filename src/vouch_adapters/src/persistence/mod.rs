pub mod hashmap_user_store;
pub mod hashmap_verification_token_store;
pub mod postgres_user_store;
pub mod postgres_verification_token_store;

pub use hashmap_user_store::HashMapUserStore;
pub use hashmap_verification_token_store::HashMapVerificationTokenStore;
pub use postgres_user_store::PostgresUserStore;
pub use postgres_verification_token_store::PostgresVerificationTokenStore;
