//! Given step definitions

use cucumber::given;
use itemcheck_acceptance::world::ItemsWorld;
use itemcheck_mock::client::{ApiSession, ClientConfig};

#[given(expr = "I launch a login request and we get the token")]
async fn login(world: &mut ItemsWorld) {
    let token = world.session.login().await.expect("Login request failed");
    assert!(!token.is_empty(), "Login returned an empty token");
}

#[given(expr = "I use the bearer token {string}")]
async fn use_token(world: &mut ItemsWorld, token: String) {
    let config = ClientConfig::new(world.session.client().base_url()).with_token(token);
    world.session = ApiSession::new(config).expect("Failed to build API client");
}
