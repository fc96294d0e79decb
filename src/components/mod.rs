pub mod review_form;
pub mod sentiment_result;
