//! Then step definitions

use cucumber::{gherkin::Step, then};
use itemcheck_acceptance::table::criteria_from_table;
use itemcheck_acceptance::world::ItemsWorld;
use itemcheck_criteria::CriterionRow;
use itemcheck_mock::client::ClientError;
use itemcheck_mock::store::load_items;

fn criteria(step: &Step) -> Vec<CriterionRow> {
    let table = step.table.as_ref().expect("Missing data table");
    criteria_from_table(&table.rows)
}

#[then(expr = "I verify that all items are obtained")]
async fn verify_items(world: &mut ItemsWorld, step: &Step) {
    world.assert_no_error();
    let rows = criteria(step);
    if let Err(e) = world.session.verify_items(&rows) {
        panic!("{e}");
    }
}

#[then(expr = "verification fails for the criteria")]
async fn verification_fails(world: &mut ItemsWorld, step: &Step) {
    world.assert_no_error();
    let rows = criteria(step);
    match world.session.verify_items(&rows) {
        Err(ClientError::NoMatch(e)) => world.diagnostics.add_error(e.to_string()),
        Err(e) => panic!("Unexpected error: {e}"),
        Ok(_) => panic!("Expected a criteria row to match no item"),
    }
}

#[then(expr = "the item list contains {int} items")]
async fn item_count(world: &mut ItemsWorld, expected: usize) {
    world.assert_no_error();
    let items = world.session.items().expect("Items were not fetched");
    assert_eq!(items.len(), expected);
}

#[then(expr = "I confirm that the parameter has been {string} correctly")]
async fn confirm_action(world: &mut ItemsWorld, action: String) {
    world.assert_no_error();
    let id = world.created_id();
    let persisted = world
        .server
        .as_ref()
        .map(|server| load_items(server.data_file()));
    let on_disk = |id: i64| {
        persisted
            .as_ref()
            .map(|items| items.iter().find(|item| item.id() == Some(id)).cloned())
    };

    match action.as_str() {
        "created" => {
            let created = world.created.clone().expect("No item was created");
            let fetched = world.session.get_item(id).await.expect("Created item not found");
            assert_eq!(fetched, created);
            if let Some(stored) = on_disk(id) {
                assert_eq!(stored.as_ref(), Some(&created), "Item not persisted");
            }
        }
        "updated" => {
            let fields = world.last_update.clone().expect("No update was sent");
            let fetched = world.session.get_item(id).await.expect("Updated item not found");
            for (field, value) in fields.iter() {
                assert_eq!(fetched.get(field), Some(value), "Field {field} not updated");
            }
            if let Some(stored) = on_disk(id) {
                assert_eq!(stored.as_ref(), Some(&fetched), "Update not persisted");
            }
        }
        "deleted" => {
            match world.session.get_item(id).await {
                Err(e) => assert_eq!(e.status(), Some(404), "Unexpected error: {e}"),
                Ok(item) => panic!("Item still exists: {item}"),
            }
            if let Some(stored) = on_disk(id) {
                assert!(stored.is_none(), "Deleted item still persisted");
            }
        }
        other => panic!("Unknown action '{other}'"),
    }
}

#[then(expr = "the request is rejected with status {int} and message {string}")]
async fn rejected(world: &mut ItemsWorld, status: u16, message: String) {
    match world.last_error.take() {
        Some(ClientError::Server {
            status: actual,
            message: actual_message,
        }) => {
            assert_eq!(actual, status);
            assert_eq!(actual_message, message);
        }
        Some(other) => panic!("Unexpected error: {other}"),
        None => panic!("Expected the request to be rejected"),
    }
}
