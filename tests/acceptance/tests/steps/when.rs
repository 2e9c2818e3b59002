//! When step definitions

use cucumber::{gherkin::Step, when};
use itemcheck_acceptance::table::records_from_table;
use itemcheck_acceptance::world::ItemsWorld;
use itemcheck_criteria::Record;

fn single_record(step: &Step) -> Record {
    let table = step.table.as_ref().expect("Missing data table");
    records_from_table(&table.rows)
        .into_iter()
        .next()
        .expect("Data table has no data row")
}

#[when(expr = "I launch the petition to obtain all the items")]
async fn fetch_items(world: &mut ItemsWorld) {
    if let Err(e) = world.session.fetch_items().await {
        world.record_error(e);
    }
}

#[when(expr = "I send a creation request with the following parameters")]
async fn create_item(world: &mut ItemsWorld, step: &Step) {
    let candidate = single_record(step);
    match world.session.create_item(&candidate).await {
        Ok(item) => world.created = Some(item),
        Err(e) => world.record_error(e),
    }
}

#[when(expr = "I send an update request for the created item with the following parameters")]
async fn update_item(world: &mut ItemsWorld, step: &Step) {
    let fields = single_record(step);
    let id = world.created_id();
    match world.session.update_item(id, &fields).await {
        Ok(_) => world.last_update = Some(fields),
        Err(e) => world.record_error(e),
    }
}

#[when(expr = "I delete the element created by its ID")]
async fn delete_item(world: &mut ItemsWorld) {
    let id = world.created_id();
    match world.session.delete_item(id).await {
        Ok(message) => assert_eq!(message, "Item deleted"),
        Err(e) => world.record_error(e),
    }
}
