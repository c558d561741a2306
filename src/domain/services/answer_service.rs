#[cfg(test)]
#[path = "answer_service_test.rs"]
mod tests;

use crate::domain::models::BackendBox;
use crate::domain::models::Message;
use crate::domain::models::ServiceError;

const DOCUMENT_LABEL: &str = "Contract:";
const QUESTION_LABEL: &str = "Question:";

/// Builds the single user message carrying both the document and the
/// question.
pub fn augmented_question(document_text: &str, question: &str) -> Message {
    return Message::User(format!(
        "{DOCUMENT_LABEL}\n{document_text}\n\n{QUESTION_LABEL} {question}"
    ));
}

pub struct AnswerService {
    backend: BackendBox,
}

impl AnswerService {
    pub fn new(backend: BackendBox) -> AnswerService {
        return AnswerService { backend };
    }

    /// Asks the model a question about the document. The transcript is sent
    /// as-is followed by the augmented question, and is never modified here:
    /// recording the exchange is up to the caller.
    pub async fn ask(
        &self,
        transcript: &[Message],
        document_text: &str,
        question: &str,
    ) -> Result<String, ServiceError> {
        let mut messages = transcript.to_vec();
        messages.push(augmented_question(document_text, question));

        tracing::debug!(
            messages = messages.len(),
            document_len = document_text.len(),
            "Requesting answer"
        );

        let answer = self.backend.get_completion(&messages).await?;
        return Ok(answer);
    }
}
