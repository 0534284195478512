// Console commands for reviews.
//
// Add and edit go through moderation inside the catalog service; a rejected
// text surfaces as a ValidationRejected failure with the reason.

use crate::console::cli::ReviewCommand;
use crate::console::{print_json, CommandError, Data};
use crate::core::catalog::ReviewRef;
use serde_json::json;

pub async fn run(data: &Data, command: ReviewCommand) -> Result<(), CommandError> {
    match command {
        ReviewCommand::List { liquor_id, sort } => {
            let reviews = data.catalog.list_reviews(&liquor_id, sort).await?;
            print_json(&reviews)
        }

        ReviewCommand::Add { liquor_id, content } => {
            let review = data.catalog.add_review(&liquor_id, &content).await?;
            print_json(&review)
        }

        ReviewCommand::Edit {
            liquor_id,
            review_id,
            content,
        } => {
            let review = data.catalog.update_review(&liquor_id, &review_id, &content).await?;
            print_json(&review)
        }

        ReviewCommand::Like { liquor_id, review_id } => {
            let review = data.catalog.like_review(&liquor_id, &review_id).await?;
            print_json(&json!({ "id": review.id, "likes": review.likes }))
        }

        ReviewCommand::Delete {
            liquor_id,
            review_id,
            index,
        } => {
            let target = match (review_id, index) {
                (Some(id), None) => ReviewRef::Id(id),
                (None, Some(index)) => ReviewRef::Position(index),
                _ => {
                    return Err(CommandError::Usage(
                        "give either a review id or --index".to_string(),
                    ))
                }
            };

            data.catalog.delete_review(&liquor_id, target.clone()).await?;
            print_json(&json!({ "liquor_id": liquor_id, "deleted": target.to_string() }))
        }
    }
}
