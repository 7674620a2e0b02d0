//! One-shot questions to the travel assistant

use anyhow::Result;
use serde::Serialize;

use super::Session;
use crate::cli::output::{print_formatted, OutputFormat};
use crate::providers::assistant::describe_error;
use crate::providers::ProviderError;

#[derive(Debug, Serialize)]
struct AnswerOutput {
    question: String,
    answer: String,
}

/// Ask the assistant; a quota error disables it for the rest of the session
pub async fn run(session: &mut Session, words: Vec<String>, format: OutputFormat) -> Result<()> {
    let answer = ask(session, &words.join(" ")).await?;
    print_formatted(&answer, format, |a| a.answer.clone());
    Ok(())
}

async fn ask(session: &mut Session, question: &str) -> Result<AnswerOutput> {
    let question = question.trim();
    if question.is_empty() {
        anyhow::bail!("Ask a question, e.g. ask \"best time to visit Lisbon?\"");
    }

    if session.assistant_disabled {
        anyhow::bail!("The travel assistant is out of API quota for this session.");
    }

    let assistant = &session.providers.assistant;
    assistant
        .ensure_configured()
        .map_err(|e| anyhow::anyhow!(describe_error(&e)))?;

    match assistant.reply(question).await {
        Ok(answer) => Ok(AnswerOutput {
            question: question.to_string(),
            answer,
        }),
        Err(e) => {
            if e == ProviderError::QuotaExceeded {
                tracing::warn!("Assistant quota exhausted, disabling for this session");
                session.assistant_disabled = true;
            }
            Err(anyhow::anyhow!(describe_error(&e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::providers::mock_server::{MockResponse, MockServer};
    use crate::providers::Credentials;

    const QUOTA: &str = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota"}}"#;

    fn session(server: &MockServer, credentials: Credentials) -> Session {
        let mut config = Config::default();
        config.assistant.base_url = server.url();
        Session::new(config, credentials).unwrap()
    }

    fn keyed() -> Credentials {
        Credentials::from_lookup(|_| Some("sk-test".to_string()))
    }

    #[tokio::test]
    async fn test_answer() {
        let server = MockServer::start(MockResponse::json(
            r#"{"choices":[{"message":{"role":"assistant","content":"Go in May."}}]}"#,
        ))
        .await;
        let mut session = session(&server, keyed());

        let answer = ask(&mut session, "When should I visit Lisbon?").await.unwrap();
        assert_eq!(answer.answer, "Go in May.");
        assert_eq!(answer.question, "When should I visit Lisbon?");
    }

    #[tokio::test]
    async fn test_missing_key_sends_nothing() {
        let server = MockServer::start(MockResponse::json("{}")).await;
        let mut session = session(&server, Credentials::default());

        let err = ask(&mut session, "Hello").await.unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
        assert!(server.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_quota_is_sticky_for_session() {
        let server = MockServer::start(MockResponse::error(429, QUOTA)).await;
        let mut session = session(&server, keyed());

        assert!(ask(&mut session, "First").await.is_err());
        assert!(session.assistant_disabled);

        let err = ask(&mut session, "Second").await.unwrap_err();
        assert!(err.to_string().contains("quota"));
        assert_eq!(server.requests().await.len(), 1);
    }
}
