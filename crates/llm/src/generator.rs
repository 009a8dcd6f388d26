use crate::{ChatMessage, OpenAiClient};
use anyhow::Result;
use tracing::info;

const CHECKLIST_SYSTEM_PROMPT: &str = "You generate a detailed roadmap for a specified \
subject, covering the research needed, programs or software that may help, useful \
literature and readings, and practicable goals. You then produce a weekly checklist \
for that roadmap, with an achievable goal every week and a bi-daily reading \
suggestion. Do not overelaborate or add any off-topic information.";

const TITLE_SYSTEM_PROMPT: &str = "You name learning roadmaps. Respond with a short \
title of at most six words, with no quotes and no extra commentary.";

/// Turns a goal description into checklist lines and a roadmap title.
pub struct ChecklistGenerator {
    client: OpenAiClient,
}

impl ChecklistGenerator {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }

    /// Request a weekly checklist for the goal and split the response into
    /// task lines. Nothing is produced unless the full response arrives, so a
    /// failed call never yields a partial checklist.
    pub async fn checklist(&self, goal: &str) -> Result<Vec<String>> {
        let messages = vec![
            ChatMessage::system(CHECKLIST_SYSTEM_PROMPT),
            ChatMessage::user(&format!(
                "Create a checklist for achieving the goal: {goal}. Include weekly \
                 small step goals that progress the skill, and reading recommendations \
                 where the subject calls for them. Assume the checklist is worked \
                 through in a weekly format, with learning checks and a challenge check."
            )),
        ];

        let text = self.client.chat(messages).await?;
        let lines = split_checklist(&text);
        info!(model = %self.client.model(), count = lines.len(), "generated checklist");
        Ok(lines)
    }

    /// Request a short display title for the goal. Shown in the roadmap
    /// panel, never persisted as a task.
    pub async fn roadmap_title(&self, goal: &str) -> Result<String> {
        let messages = vec![
            ChatMessage::system(TITLE_SYSTEM_PROMPT),
            ChatMessage::user(&format!("Name a roadmap for the goal: {goal}")),
        ];

        let text = self.client.chat(messages).await?;
        Ok(text.trim().trim_matches('"').to_string())
    }
}

/// Split completion text into task lines: one per line, trimmed, blank lines
/// discarded.
pub fn split_checklist(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn split_discards_blanks_and_trims() {
        let lines = split_checklist("Week 1: read chapter 1\n\nWeek 2: practice\n");
        assert_eq!(lines, vec!["Week 1: read chapter 1", "Week 2: practice"]);
    }

    #[test]
    fn split_trims_inner_whitespace_lines() {
        let lines = split_checklist("  a  \n   \n\tb\n");
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn split_of_empty_text_is_empty() {
        assert!(split_checklist("").is_empty());
        assert!(split_checklist("\n\n").is_empty());
    }

    fn generator_for(server: &Server) -> ChecklistGenerator {
        let client = OpenAiClient::new(
            "test-key".to_string(),
            "gpt-4o-mini".to_string(),
            Some(server.url()),
        )
        .unwrap();
        ChecklistGenerator::new(client)
    }

    #[tokio::test]
    async fn checklist_splits_the_full_response() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"message": {"role": "assistant",
                    "content": "Week 1: read chapter 1\n\nWeek 2: practice\n"}}]}"#,
            )
            .create_async()
            .await;

        let lines = generator_for(&server)
            .checklist("learn Rust")
            .await
            .unwrap();
        assert_eq!(lines, vec!["Week 1: read chapter 1", "Week 2: practice"]);
    }

    #[tokio::test]
    async fn checklist_failure_yields_no_lines() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(502)
            .create_async()
            .await;

        let result = generator_for(&server).checklist("learn Rust").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn roadmap_title_is_trimmed_and_unquoted() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"message": {"role": "assistant",
                    "content": "\"Rust in Twelve Weeks\"\n"}}]}"#,
            )
            .create_async()
            .await;

        let title = generator_for(&server)
            .roadmap_title("learn Rust")
            .await
            .unwrap();
        assert_eq!(title, "Rust in Twelve Weeks");
    }
}
