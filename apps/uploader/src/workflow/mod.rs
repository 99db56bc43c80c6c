//! Upload workflow — the single source of truth for what the user sees.
//!
//! Idle → Loading → {Succeeded | Failed} → Idle (on the next selection).
//! At most one upload is in flight; every guard violation is reported as a
//! `WorkflowError` and leaves the state untouched.

use tracing::{debug, info, warn};

use crate::errors::{UploadError, WorkflowError};
use crate::models::portfolio::PortfolioData;
use crate::models::upload::UploadRequest;
use crate::upload::validator::{validate, Validation};
use crate::upload::ResumeUploader;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Loading,
    Succeeded(PortfolioData),
    Failed(String),
}

impl WorkflowState {
    pub fn is_loading(&self) -> bool {
        matches!(self, WorkflowState::Loading)
    }
}

#[derive(Debug, Default)]
pub struct UploadWorkflow {
    state: WorkflowState,
    pending: Option<UploadRequest>,
}

impl UploadWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    #[allow(dead_code)]
    pub fn pending(&self) -> Option<&UploadRequest> {
        self.pending.as_ref()
    }

    /// Selects a new file. Any previous result is discarded first, so a
    /// completed workflow always returns to Idle here. A rejected file leaves
    /// the workflow Idle with nothing pending.
    pub fn select_file(&mut self, request: UploadRequest) -> Result<(), WorkflowError> {
        if self.state.is_loading() {
            return Err(WorkflowError::AlreadyLoading);
        }
        self.reset();

        match validate(&request.media_type) {
            Validation::Accepted => {
                debug!("Selected {} ({})", request.file_name, request.media_type);
                self.pending = Some(request);
                Ok(())
            }
            Validation::Rejected(reason) => {
                warn!(
                    "Rejected {} with media type {}",
                    request.file_name, request.media_type
                );
                Err(WorkflowError::InvalidFile(reason))
            }
        }
    }

    /// Returns to Idle and clears the pending file and any stored result.
    /// Ignored while an upload is in flight.
    pub fn reset(&mut self) {
        if self.state.is_loading() {
            return;
        }
        self.state = WorkflowState::Idle;
        self.pending = None;
    }

    /// Moves to Loading and hands out a copy of the pending request.
    /// The pending file is kept so a failed upload can be resubmitted.
    pub fn begin_submit(&mut self) -> Result<UploadRequest, WorkflowError> {
        if self.state.is_loading() {
            return Err(WorkflowError::AlreadyLoading);
        }
        let request = self.pending.clone().ok_or(WorkflowError::NoPendingFile)?;
        self.state = WorkflowState::Loading;
        Ok(request)
    }

    /// Records the outcome of the in-flight upload. Outside Loading there is
    /// nothing to complete and the result is dropped.
    pub fn finish(&mut self, result: Result<PortfolioData, UploadError>) {
        if !self.state.is_loading() {
            warn!("Dropping upload result received outside of Loading");
            return;
        }
        self.state = match result {
            Ok(portfolio) => {
                info!("Upload succeeded: {}", portfolio.portfolio_url);
                WorkflowState::Succeeded(portfolio)
            }
            Err(e) => {
                warn!("Upload failed: {e}");
                WorkflowState::Failed(e.to_string())
            }
        };
    }

    /// Uploads the pending file and returns the terminal state.
    #[allow(dead_code)]
    pub async fn submit<U>(&mut self, uploader: &U) -> Result<&WorkflowState, WorkflowError>
    where
        U: ResumeUploader + ?Sized,
    {
        let request = self.begin_submit()?;
        let result = uploader.upload(&request).await;
        self.finish(result);
        Ok(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    use crate::upload::testing::FakeUploader;
    use crate::upload::validator::{DOCX_MEDIA_TYPE, INVALID_FILE_TYPE_MESSAGE, PDF_MEDIA_TYPE};

    fn portfolio(id: &str) -> PortfolioData {
        PortfolioData {
            portfolio_url: format!("https://x/{id}"),
            download_url: format!("https://x/{id}.html"),
            portfolio_id: id.to_string(),
        }
    }

    fn pdf() -> UploadRequest {
        UploadRequest::new("cv.pdf", PDF_MEDIA_TYPE, Bytes::from_static(b"%PDF"))
    }

    fn docx() -> UploadRequest {
        UploadRequest::new("cv.docx", DOCX_MEDIA_TYPE, Bytes::from_static(b"PK"))
    }

    #[test]
    fn test_starts_idle() {
        let workflow = UploadWorkflow::new();
        assert_eq!(workflow.state(), &WorkflowState::Idle);
        assert!(workflow.pending().is_none());
    }

    #[test]
    fn test_select_valid_file_records_pending_without_state_change() {
        let mut workflow = UploadWorkflow::new();
        workflow.select_file(pdf()).unwrap();
        assert_eq!(workflow.state(), &WorkflowState::Idle);
        assert_eq!(workflow.pending().unwrap().file_name, "cv.pdf");
    }

    #[test]
    fn test_select_invalid_file_reports_reason() {
        let mut workflow = UploadWorkflow::new();
        let bad = UploadRequest::new("cv.txt", "text/plain", Bytes::from_static(b"hi"));

        let err = workflow.select_file(bad).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::InvalidFile(INVALID_FILE_TYPE_MESSAGE.to_string())
        );
        assert_eq!(workflow.state(), &WorkflowState::Idle);
        assert!(workflow.pending().is_none());
    }

    #[test]
    fn test_invalid_selection_replaces_previous_pending_file() {
        let mut workflow = UploadWorkflow::new();
        workflow.select_file(pdf()).unwrap();
        let bad = UploadRequest::new("cv.png", "image/png", Bytes::new());
        assert!(workflow.select_file(bad).is_err());
        assert!(workflow.pending().is_none());
    }

    #[tokio::test]
    async fn test_submit_without_pending_file_is_rejected() {
        let mut workflow = UploadWorkflow::new();
        let uploader = FakeUploader::new(vec![]);

        let err = workflow.submit(&uploader).await.unwrap_err();
        assert_eq!(err, WorkflowError::NoPendingFile);
        assert_eq!(uploader.calls(), 0);
        assert_eq!(workflow.state(), &WorkflowState::Idle);
    }

    #[tokio::test]
    async fn test_submit_while_loading_is_rejected() {
        let mut workflow = UploadWorkflow::new();
        let uploader = FakeUploader::new(vec![Ok(portfolio("1"))]);
        workflow.select_file(pdf()).unwrap();

        workflow.begin_submit().unwrap();
        assert_eq!(workflow.state(), &WorkflowState::Loading);

        let err = workflow.submit(&uploader).await.unwrap_err();
        assert_eq!(err, WorkflowError::AlreadyLoading);
        assert_eq!(uploader.calls(), 0);
        assert_eq!(workflow.state(), &WorkflowState::Loading);
    }

    #[test]
    fn test_select_while_loading_is_rejected() {
        let mut workflow = UploadWorkflow::new();
        workflow.select_file(pdf()).unwrap();
        workflow.begin_submit().unwrap();

        assert_eq!(
            workflow.select_file(docx()).unwrap_err(),
            WorkflowError::AlreadyLoading
        );
        assert_eq!(workflow.pending().unwrap().file_name, "cv.pdf");

        workflow.reset();
        assert_eq!(workflow.state(), &WorkflowState::Loading);
    }

    #[tokio::test]
    async fn test_success_stores_exact_portfolio() {
        let mut workflow = UploadWorkflow::new();
        let uploader = FakeUploader::new(vec![Ok(portfolio("1"))]);
        workflow.select_file(pdf()).unwrap();

        let state = workflow.submit(&uploader).await.unwrap().clone();

        assert_eq!(
            state,
            WorkflowState::Succeeded(PortfolioData {
                portfolio_url: "https://x/1".to_string(),
                download_url: "https://x/1.html".to_string(),
                portfolio_id: "1".to_string(),
            })
        );
        assert_eq!(uploader.calls(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_stores_message() {
        let mut workflow = UploadWorkflow::new();
        let uploader = FakeUploader::new(vec![Err(UploadError::Transport(
            "connection refused".to_string(),
        ))]);
        workflow.select_file(pdf()).unwrap();

        workflow.submit(&uploader).await.unwrap();
        assert_eq!(
            workflow.state(),
            &WorkflowState::Failed("connection refused".to_string())
        );
    }

    #[tokio::test]
    async fn test_server_failure_stores_server_message() {
        let mut workflow = UploadWorkflow::new();
        let uploader = FakeUploader::new(vec![Err(UploadError::Server {
            status: 400,
            message: "bad file".to_string(),
        })]);
        workflow.select_file(docx()).unwrap();

        workflow.submit(&uploader).await.unwrap();
        assert_eq!(
            workflow.state(),
            &WorkflowState::Failed("bad file".to_string())
        );
    }

    #[tokio::test]
    async fn test_failed_submission_can_be_retried() {
        let mut workflow = UploadWorkflow::new();
        let uploader = FakeUploader::new(vec![
            Err(UploadError::Transport("timed out".to_string())),
            Ok(portfolio("2")),
        ]);
        workflow.select_file(pdf()).unwrap();

        workflow.submit(&uploader).await.unwrap();
        assert!(matches!(workflow.state(), WorkflowState::Failed(_)));

        workflow.submit(&uploader).await.unwrap();
        assert_eq!(workflow.state(), &WorkflowState::Succeeded(portfolio("2")));
        assert_eq!(uploader.calls(), 2);
    }

    #[tokio::test]
    async fn test_new_selection_after_success_resets_to_idle() {
        let mut workflow = UploadWorkflow::new();
        let uploader = FakeUploader::new(vec![Ok(portfolio("1")), Ok(portfolio("2"))]);
        workflow.select_file(pdf()).unwrap();
        workflow.submit(&uploader).await.unwrap();
        assert!(matches!(workflow.state(), WorkflowState::Succeeded(_)));

        workflow.select_file(docx()).unwrap();
        assert_eq!(workflow.state(), &WorkflowState::Idle);
        assert_eq!(workflow.pending().unwrap().file_name, "cv.docx");

        workflow.submit(&uploader).await.unwrap();
        assert_eq!(workflow.state(), &WorkflowState::Succeeded(portfolio("2")));
    }

    #[test]
    fn test_finish_outside_loading_is_ignored() {
        let mut workflow = UploadWorkflow::new();
        workflow.finish(Ok(portfolio("1")));
        assert_eq!(workflow.state(), &WorkflowState::Idle);
    }

    #[test]
    fn test_reset_clears_result_and_pending() {
        let mut workflow = UploadWorkflow::new();
        workflow.select_file(pdf()).unwrap();
        workflow.begin_submit().unwrap();
        workflow.finish(Err(UploadError::Transport("boom".to_string())));

        workflow.reset();
        assert_eq!(workflow.state(), &WorkflowState::Idle);
        assert!(workflow.pending().is_none());
    }
}
