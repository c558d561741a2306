#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::AnswerService;
use super::DocumentLoader;
use crate::domain::models::Action;
use crate::domain::models::Event;

pub struct ActionsService {}

impl ActionsService {
    /// Runs actions one at a time, in the order they were sent, reporting
    /// each outcome back as an event. Returns once the action channel
    /// closes.
    pub async fn start(
        answer_service: AnswerService,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            match action {
                Action::LoadDocument(path) => {
                    tracing::debug!(path = ?path, "Loading document");
                    let res = DocumentLoader::load_file(&path).await;
                    tx.send(Event::DocumentLoaded(path, res))?;
                }
                Action::Ask(request) => {
                    let res = answer_service
                        .ask(
                            &request.transcript,
                            &request.document_text,
                            &request.question,
                        )
                        .await;
                    tx.send(Event::AnswerReceived(request.question, res))?;
                }
            }
        }

        return Ok(());
    }
}
