use crate::workflow::WorkflowState;

pub const IDLE_PROMPT: &str =
    "Upload your resume (PDF or DOCX) to generate your personal portfolio website.";
pub const LOADING_MESSAGE: &str = "Generating your portfolio...";
pub const READY_HEADLINE: &str = "Hurray! Your Portfolio is Ready.";

/// Plain-text view of the current workflow state.
pub fn render(state: &WorkflowState) -> String {
    match state {
        WorkflowState::Idle => IDLE_PROMPT.to_string(),
        WorkflowState::Loading => LOADING_MESSAGE.to_string(),
        WorkflowState::Succeeded(portfolio) => format!(
            "{READY_HEADLINE}\n\
             View your portfolio: {}\n\
             Download {}: {}",
            portfolio.portfolio_url,
            portfolio.html_file_name(),
            portfolio.download_url
        ),
        WorkflowState::Failed(message) => format!("Error: {message}"),
    }
}
