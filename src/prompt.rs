use crate::models::review::Sentiment;

/// Builds the single instruction sent to the completion service for one review.
/// `review` is expected to be trimmed already.
pub fn build_prompt(review: &str) -> String {
    let categories = Sentiment::ALL
        .iter()
        .map(|category| format!("\"{}\"", category))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        concat!(
            "Your task is to perform sentiment analysis on a movie review.\n",
            "Your response MUST be a single, valid JSON object and nothing else.\n",
            "The JSON object must have two keys: \"sentiment\" and \"explanation\".\n\n",
            "\"sentiment\" must be one of these three exact strings: {}.\n",
            "- Classify as \"Neutral\" if the review is mixed, purely factual, a question, or nonsensical.\n\n",
            "\"explanation\" must be a concise, one-sentence string justifying the sentiment.\n\n",
            "Analyze this review: \"{}\"\n"
        ),
        categories, review
    )
}
