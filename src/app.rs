/// Main application entry point for the review analyzer.
/// Routes between the submission form and the results view.
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use crate::components::{review_form::ReviewForm, sentiment_result::SentimentResult};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/reelmood.css"/>
        <Title text="AI Movie Review Sentiment Analyzer"/>
        <Router>
            <main class="page">
                <Routes>
                    <Route path="/" view=ReviewForm/>
                    <Route path="/results" view=SentimentResult/>
                </Routes>
            </main>
        </Router>
    }
}
