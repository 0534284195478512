// Console commands for the moderation word lists.

use crate::console::cli::FilterCommand;
use crate::console::{print_json, CommandError, Data};
use crate::core::moderation::ModerationVerdict;
use serde_json::json;

pub async fn run(data: &Data, command: FilterCommand) -> Result<(), CommandError> {
    match command {
        FilterCommand::List => {
            let words = data.moderation.list_words().await?;
            print_json(&words)
        }

        FilterCommand::Add { word, kind } => {
            let word = data.moderation.add_word(&word, kind).await?;
            print_json(&word)
        }

        FilterCommand::Delete { id } => {
            data.moderation.delete_word(&id).await?;
            print_json(&json!({ "deleted": id }))
        }

        FilterCommand::Check { text } => {
            let verdict = data.moderation.check_text(&text).await?;
            let reason = match &verdict {
                ModerationVerdict::Accepted => None,
                ModerationVerdict::Rejected(reason) => Some(reason.to_string()),
            };
            print_json(&json!({ "accepted": verdict.is_accepted(), "reason": reason }))
        }
    }
}
