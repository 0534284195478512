// Console commands for store listings.

use crate::console::cli::StoreCommand;
use crate::console::{print_json, CommandError, Data};
use crate::core::catalog::NewStore;
use serde_json::json;

pub async fn run(data: &Data, command: StoreCommand) -> Result<(), CommandError> {
    match command {
        StoreCommand::List { liquor_id, sort } => {
            let stores = data.catalog.list_stores(&liquor_id, sort).await?;
            print_json(&stores)
        }

        StoreCommand::Add {
            liquor_id,
            name,
            address,
            contact,
            price,
        } => {
            let store = data
                .catalog
                .add_store(
                    &liquor_id,
                    NewStore {
                        name,
                        address,
                        contact,
                        price,
                    },
                )
                .await?;
            print_json(&store)
        }

        StoreCommand::Delete { liquor_id, store_id } => {
            data.catalog.delete_store(&liquor_id, &store_id).await?;
            print_json(&json!({ "liquor_id": liquor_id, "deleted": store_id }))
        }
    }
}
