use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use vouch_adapters::config::AllowedOrigins;
use vouch_adapters::http::routes::{login, resend_verification, signup, status, verify_email};
use vouch_application::{
    LoginUseCase, RedeemVerificationUseCase, ResendVerificationUseCase, SignupUseCase,
};
use vouch_core::{Clock, EmailClient, PasswordScheme, UserStore, VerificationTokenStore};

use crate::request_tracing::{make_span_with_request_id, on_request, on_response};

/// The verify-then-authenticate gate as a mountable router.
///
/// Wires the use cases once at construction and gives each route exactly the
/// state it needs. Stores and clients are `Clone` over internal shared
/// handles (`Arc`, connection pools), so cloning here is cheap.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Create a new AuthService with the provided stores, password scheme,
    /// email client, and clock.
    ///
    /// # Arguments
    /// * `base_url` - Public base URL embedded in verification links
    pub fn new<U, T, P, E, C>(
        user_store: U,
        token_store: T,
        password_scheme: P,
        email_client: E,
        clock: C,
        base_url: String,
    ) -> Self
    where
        U: UserStore + Clone + Send + Sync + 'static,
        T: VerificationTokenStore + Clone + Send + Sync + 'static,
        P: PasswordScheme + Clone + Send + Sync + 'static,
        E: EmailClient + Clone + Send + Sync + 'static,
        C: Clock + Clone + Send + Sync + 'static,
    {
        let signup_use_case = SignupUseCase::new(
            user_store.clone(),
            token_store.clone(),
            password_scheme.clone(),
            email_client.clone(),
            clock.clone(),
            base_url.clone(),
        );
        let login_use_case = LoginUseCase::new(user_store.clone(), password_scheme);
        let redeem_use_case = RedeemVerificationUseCase::new(
            token_store.clone(),
            user_store.clone(),
            clock.clone(),
        );
        let resend_use_case = ResendVerificationUseCase::new(
            user_store.clone(),
            token_store,
            email_client,
            clock,
            base_url,
        );

        let router = Router::new()
            .merge(
                Router::new()
                    .route("/signup", post(signup::<U, T, P, E, C>))
                    .with_state(signup_use_case),
            )
            .merge(
                Router::new()
                    .route("/login", post(login::<U, P>))
                    .with_state(login_use_case),
            )
            .merge(
                Router::new()
                    .route("/verify-email", get(verify_email::<T, U, C>))
                    .with_state(redeem_use_case),
            )
            .merge(
                Router::new()
                    .route("/resend-verification", post(resend_verification::<U, T, E, C>))
                    .with_state(resend_use_case),
            )
            .merge(
                Router::new()
                    .route("/status", get(status::<U>))
                    .with_state(user_store),
            );

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert into a router that can be nested into another application.
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional CORS allow-list for the dashboard
    ///   frontend
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
