use async_trait::async_trait;

use super::provider::{GenerationOptions, ProviderFailure, TextGenerator};

/// Canned answers for running the bot without any model behind it.
pub struct OfflineGenerator;

const ANSWERS: [(&[&str], &str); 4] = [
    (
        &["passing score", "bestehen", "punkte"],
        "The passing score for the Goethe B1 exam is 60% (180 points) in total and at least 60% in each module.",
    ),
    (
        &["writing tips", "schreibtipps"],
        "For B1 writing: 1) Follow the structure 2) Use formal language if required 3) Check grammar \
         4) Write at least 100 words 5) Manage your time (5 min planning, 20 min writing, 5 min checking).",
    ),
    (
        &["prepositions", "präpositionen"],
        "Important B1 prepositions: wegen (because of), trotz (despite), während (during), \
         gegenüber (opposite) - remember their cases!",
    ),
    (
        &["speaking test", "mündliche prüfung"],
        "B1 speaking has 3 parts: 1) Introduce yourself 2) Discuss a topic 3) Plan something with partner. \
         Speak clearly and interact naturally.",
    ),
];

const FALLBACK: &str = "I can help with B1 exam questions about: passing requirements, writing tips, \
                        important vocabulary, or test structure. Please ask specifically.";

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, ProviderFailure> {
        let prompt = prompt.to_lowercase();
        let answer = ANSWERS
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| prompt.contains(*k)))
            .map_or(FALLBACK, |(_, answer)| *answer);

        Ok(answer.to_string())
    }
}
