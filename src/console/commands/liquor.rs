// Console commands for liquor records.

use crate::console::cli::LiquorCommand;
use crate::console::{print_json, CommandError, Data};
use crate::core::catalog::NewLiquor;
use serde_json::json;

pub async fn run(data: &Data, command: LiquorCommand) -> Result<(), CommandError> {
    match command {
        LiquorCommand::Add {
            name,
            kind,
            description,
            rating,
            profile,
            image,
        } => {
            let image = match image {
                Some(path) => Some(std::fs::read(&path).map_err(|e| {
                    CommandError::Usage(format!("cannot read image {}: {}", path.display(), e))
                })?),
                None => None,
            };

            let liquor = data
                .catalog
                .create_liquor(NewLiquor {
                    name,
                    kind,
                    description,
                    rating,
                    image,
                    profile,
                })
                .await?;
            print_json(&liquor)
        }

        LiquorCommand::List { after, limit } => {
            let limit = limit.unwrap_or(data.page_size);
            let liquors = data.catalog.list_liquors(after, limit).await?;
            print_json(&liquors)
        }

        LiquorCommand::Show { id } => {
            let liquor = data.catalog.get_liquor(&id).await?;
            print_json(&liquor)
        }

        LiquorCommand::Delete { id } => {
            data.catalog.delete_liquor(&id).await?;
            print_json(&json!({ "deleted": id }))
        }
    }
}
