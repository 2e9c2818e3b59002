//! Cucumber acceptance tests for the mock item API
//!
//! Run with: cargo test --test acceptance
//!
//! Scenarios run against an in-process server seeded from
//! `fixtures/mock_data.yaml`. Set `API_URL` to target a running server.

mod steps;

use cucumber::{writer, World, WriterExt};
use futures::FutureExt;
use itemcheck_acceptance::world::ItemsWorld;
use itemcheck_mock::diagnostics::ScenarioDiagnostics;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    ItemsWorld::cucumber()
        .max_concurrent_scenarios(1)
        .before(|_feature, _rule, scenario, world| {
            async move {
                tracing::info!("Starting scenario: {}", scenario.name);
                world.diagnostics = ScenarioDiagnostics::new(scenario.name.clone());
            }
            .boxed_local()
        })
        .after(|_feature, _rule, scenario, _ev, world| {
            async move {
                if let Some(w) = world {
                    for entry in w.diagnostics.finish() {
                        tracing::info!("[{}] {}", scenario.name, entry.message);
                    }
                }
            }
            .boxed_local()
        })
        .with_writer(writer::Basic::stdout().summarized().assert_normalized())
        .filter_run_and_exit("features/", |_, _, sc| !sc.tags.iter().any(|t| t == "skip"))
        .await;
}
