use crate::models::review::Sentiment;
use leptos::*;
use leptos_router::{use_query_map, A};

/// Fixed visual treatment for each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentStyle {
    pub class: &'static str,
    pub icon: &'static str,
}

pub fn style_for(sentiment: Sentiment) -> SentimentStyle {
    match sentiment {
        Sentiment::Positive => SentimentStyle { class: "sentiment-positive", icon: "😊" },
        Sentiment::Negative => SentimentStyle { class: "sentiment-negative", icon: "😞" },
        Sentiment::Neutral => SentimentStyle { class: "sentiment-neutral", icon: "😐" },
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ResultParams {
    sentiment: Sentiment,
    explanation: String,
    review_text: String,
}

// Missing, empty or unknown values mean there is nothing to show.
fn read_params(get: impl Fn(&str) -> Option<String>) -> Option<ResultParams> {
    let present = |key: &str| get(key).filter(|value| !value.is_empty());
    Some(ResultParams {
        sentiment: present("sentiment")?.parse().ok()?,
        explanation: present("explanation")?,
        review_text: present("reviewText")?,
    })
}

#[component]
pub fn SentimentResult() -> impl IntoView {
    let query = use_query_map();
    let params = move || query.with(|q| read_params(|key| q.get(key).cloned()));

    view! {
        <div class="container">
            {move || match params() {
                Some(result) => {
                    let style = style_for(result.sentiment);
                    view! {
                        <div class=format!("card result {}", style.class)>
                            <h1>{ "Analysis Result" }</h1>
                            <h2 class="label">{ "Original Review:" }</h2>
                            <p class="quote">{ format!("\"{}\"", result.review_text) }</p>
                            <div class="verdict">
                                <span class="icon">{ style.icon }</span>
                                <h2>{ format!("Sentiment: {}", result.sentiment) }</h2>
                            </div>
                            <h3 class="label">{ "Explanation:" }</h3>
                            <p>{ result.explanation }</p>
                            <A href="/" class="button">{ "Analyze Another Review" }</A>
                        </div>
                    }
                    .into_view()
                }
                None => view! {
                    <div class="results-error">
                        <p>{ "Could not load analysis results. Please try again." }</p>
                        <A href="/" class="button">{ "Go Back" }</A>
                    </div>
                }
                .into_view(),
            }}
        </div>
    }
}
