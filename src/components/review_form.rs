use crate::models::review::{AnalysisResponse, AnalyzeRequest, ErrorResponse};
use gloo_net::http::Request;
use leptos::ev::SubmitEvent;
use leptos::*;
use leptos_router::use_navigate;

/// Path of the results page carrying one analysis in its query string.
pub fn results_path(analysis: &AnalysisResponse) -> String {
    format!(
        "/results?sentiment={}&explanation={}&reviewText={}",
        urlencoding::encode(analysis.sentiment.as_str()),
        urlencoding::encode(&analysis.explanation),
        urlencoding::encode(&analysis.review_text),
    )
}

async fn submit_review(review: String) -> Result<AnalysisResponse, String> {
    let response = Request::post("/api/analyze")
        .json(&AnalyzeRequest { review })
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.ok() {
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => "Something went wrong".to_string(),
        };
        return Err(message);
    }

    response
        .json::<AnalysisResponse>()
        .await
        .map_err(|e| e.to_string())
}

#[component]
pub fn ReviewForm() -> impl IntoView {
    let (review, set_review) = create_signal(String::new());
    let (is_loading, set_is_loading) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);
    let navigate = use_navigate();

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let text = review.get();
        if text.trim().is_empty() {
            set_error.set(Some("Review cannot be empty.".to_string()));
            return;
        }
        set_is_loading.set(true);
        set_error.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match submit_review(text).await {
                Ok(analysis) => navigate(&results_path(&analysis), Default::default()),
                Err(message) => {
                    set_error.set(Some(message));
                    set_is_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="container">
            <h1>{ "AI Movie Review" }</h1>
            <h2 class="subtitle">{ "Sentiment Analyzer" }</h2>
            <form class="card" on:submit=handle_submit>
                <label>{ "Enter a Movie Review" }</label>
                <textarea
                    id="review"
                    placeholder="e.g., 'This movie was an absolute masterpiece, the acting was incredible!'"
                    prop:value=review
                    prop:disabled=is_loading
                    on:input=move |e| set_review.set(event_target_value(&e))
                />
                {move || error.get().map(|message| view! { <p class="error">{ message }</p> })}
                <button type="submit" disabled=is_loading>
                    {move || if is_loading.get() { "Analyzing..." } else { "Analyze Sentiment" }}
                </button>
            </form>
        </div>
    }
}
