use std::time::Instant;

use anyhow::Result;

use crate::config::ModelConfig;
use crate::notify::Notifier;
use crate::openrouter::OpenRouterClient;
use crate::retrieval::Retriever;

/// Returned whenever the textbook has nothing on the question.
pub const NOT_IN_TEXTBOOK: &str = "Not in textbook.";

const SYSTEM_PROMPT: &str = "You answer strictly from textbook content.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorAnswer {
    pub answer: String,
    pub passage_count: usize,
    pub latency_ms: u128,
}

impl TutorAnswer {
    pub fn is_not_found(&self) -> bool {
        self.answer == NOT_IN_TEXTBOOK
    }
}

#[derive(Clone)]
pub struct TutorService {
    model: ModelConfig,
    retriever: Retriever,
    client: OpenRouterClient,
    notifier: Notifier,
}

impl TutorService {
    pub fn new(
        model: ModelConfig,
        retriever: Retriever,
        client: OpenRouterClient,
        notifier: Notifier,
    ) -> Self {
        Self {
            model,
            retriever,
            client,
            notifier,
        }
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Answers from retrieved textbook passages only.
    ///
    /// No passages short-circuits to [`NOT_IN_TEXTBOOK`] without calling the
    /// model. Model failures are reported on the side channel and returned.
    pub async fn answer(&self, question: &str) -> Result<TutorAnswer> {
        self.notifier.question_received(question);

        match self.answer_from_textbook(question).await {
            Ok(answer) => {
                self.notifier.answer_produced(&answer.answer);
                Ok(answer)
            }
            Err(err) => {
                self.notifier.answer_failed();
                Err(err)
            }
        }
    }

    async fn answer_from_textbook(&self, question: &str) -> Result<TutorAnswer> {
        let started = Instant::now();
        let retrieval = self.retriever.retrieve(question);

        if retrieval.is_empty() {
            tracing::info!(
                keywords = retrieval.keywords.len(),
                "no textbook passages matched, skipping model call"
            );
            return Ok(TutorAnswer {
                answer: NOT_IN_TEXTBOOK.to_string(),
                passage_count: 0,
                latency_ms: started.elapsed().as_millis(),
            });
        }

        let prompt = build_answer_prompt(question, &retrieval.passages);
        let answer = self
            .client
            .chat_completion(
                &self.model.answer_model,
                SYSTEM_PROMPT,
                &prompt,
                self.model.temperature,
            )
            .await?
            .unwrap_or_else(|| NOT_IN_TEXTBOOK.to_string());

        let latency_ms = started.elapsed().as_millis();
        tracing::info!(
            passages = retrieval.passages.len(),
            latency_ms = latency_ms as u64,
            "answered from textbook"
        );

        Ok(TutorAnswer {
            answer,
            passage_count: retrieval.passages.len(),
            latency_ms,
        })
    }
}

fn build_answer_prompt(question: &str, passages: &[String]) -> String {
    let context = passages.join("\n\n");

    format!(
        "You are an AI tutor. Answer the question using ONLY the information in the text below. \
         You can use your own words to make the answer clear and accurate.\n\
         If the answer is not present, respond exactly with \"{NOT_IN_TEXTBOOK}\"\n\
         Provide a clear and concise answer in 3-4 sentences. Do not write anything else other than the answer.\n\
         If the question requires only a 1-line answer, give just 1 line without unnecessary details.\n\n\
         Textbook Content:\n{context}\n\n\
         Question:\n{question}\n"
    )
}
