//! Test world containing shared state for cucumber scenarios

use crate::server::{fixture_path, MockServer};
use cucumber::World;
use itemcheck_criteria::Record;
use itemcheck_mock::client::{ApiSession, ClientConfig, ClientError};
use itemcheck_mock::diagnostics::ScenarioDiagnostics;

/// Per-scenario state.
///
/// Each scenario gets a fresh in-process server seeded from the fixture,
/// unless `API_URL` points the session at an already running one.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct ItemsWorld {
    /// Kept alive for the scenario; `None` when targeting `API_URL`
    pub server: Option<MockServer>,

    pub session: ApiSession,

    /// Soft failures collected while the scenario runs
    pub diagnostics: ScenarioDiagnostics,

    /// Item from the last successful creation request
    pub created: Option<Record>,

    /// Fields sent with the last update request
    pub last_update: Option<Record>,

    /// Error from the last request that was allowed to fail
    pub last_error: Option<ClientError>,
}

impl ItemsWorld {
    pub async fn new() -> Self {
        let (server, config) = match std::env::var("API_URL") {
            Ok(url) if !url.trim().is_empty() => (None, ClientConfig::new(url)),
            _ => {
                let server = MockServer::start(Some(&fixture_path()))
                    .await
                    .expect("Failed to start mock item server");
                let config = ClientConfig::new(&server.base_url);
                (Some(server), config)
            }
        };

        Self {
            server,
            session: ApiSession::new(config).expect("Failed to build API client"),
            diagnostics: ScenarioDiagnostics::new("unnamed"),
            created: None,
            last_update: None,
            last_error: None,
        }
    }

    /// Remember a failed request for a later assertion.
    pub fn record_error(&mut self, error: ClientError) {
        self.diagnostics.add_error(error.to_string());
        self.last_error = Some(error);
    }

    /// Id of the item created earlier in the scenario.
    pub fn created_id(&self) -> i64 {
        self.created
            .as_ref()
            .and_then(Record::id)
            .expect("No item has been created in this scenario")
    }

    /// Fail the step if an earlier request that should have succeeded did not.
    pub fn assert_no_error(&self) {
        if let Some(e) = &self.last_error {
            panic!("Previous request failed: {e}");
        }
    }
}
