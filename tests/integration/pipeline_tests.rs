/*!
 * End-to-end tests of the orchestrator over HTTP
 */

use std::sync::Arc;

use transfix::app_config::Config;
use transfix::presentation::{PresentationEvent, RecordingPresenter};
use transfix::services::{HttpPostProcessor, LindatTranslator};
use transfix::{OperationOutcome, TranslationOrchestrator, TranslationRequest};

use crate::common::{self, StubResponse, StubServer};

fn orchestrator_for(config: &Config, presenter: &Arc<RecordingPresenter>) -> TranslationOrchestrator {
    common::init_logging();
    TranslationOrchestrator::new(
        Arc::new(LindatTranslator::from_config(&config.primary).unwrap()),
        Arc::new(HttpPostProcessor::from_config(&config.postprocessor).unwrap()),
        presenter.clone(),
    )
}

fn config_for(primary_url: &str, postprocessor_url: &str) -> Config {
    let mut config = Config::default();
    config.primary.endpoint = primary_url.to_string();
    config.postprocessor.endpoint = postprocessor_url.to_string();
    config.primary.timeout_secs = 5;
    config.postprocessor.timeout_secs = 5;
    config.validate().expect("valid test config");
    config
}

#[tokio::test]
async fn test_pipeline_withBothServicesUp_shouldShowBothTranslations() {
    let primary = StubServer::start(vec![StubResponse::ok("Hello world")]).await;
    let fixer = StubServer::start(vec![StubResponse::ok("Hello, world!")]).await;
    let presenter = Arc::new(RecordingPresenter::new());

    let outcome = orchestrator_for(&config_for(&primary.base_url, &fixer.base_url), &presenter)
        .execute_with_outcome(TranslationRequest::new("cs", "en", "Ahoj světe"))
        .await;

    assert!(outcome.is_completed());
    assert_eq!(
        presenter.events(),
        vec![
            PresentationEvent::Started,
            PresentationEvent::PrimaryResult("Hello world".to_string()),
            PresentationEvent::FinalResult("Hello, world!".to_string()),
            PresentationEvent::Ended,
        ]
    );

    let fixer_request = &fixer.requests()[0];
    assert_eq!(
        fixer_request.form(),
        vec![
            ("source_text".to_string(), "Ahoj světe".to_string()),
            ("target_text".to_string(), "Hello world".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_pipeline_withTranslationServiceDown_shouldNotContactPostprocessor() {
    let primary_url = common::unreachable_url().await;
    let fixer = StubServer::start(vec![StubResponse::ok("unused")]).await;
    let presenter = Arc::new(RecordingPresenter::new());

    let outcome = orchestrator_for(&config_for(&primary_url, &fixer.base_url), &presenter)
        .execute_with_outcome(TranslationRequest::new("cs", "en", ""))
        .await;

    assert_eq!(outcome, OperationOutcome::PrimaryFailed);
    assert!(fixer.requests().is_empty());
    assert_eq!(
        presenter.events(),
        vec![PresentationEvent::Started, PresentationEvent::PrimaryError, PresentationEvent::Ended]
    );
}

#[tokio::test]
async fn test_pipeline_withPostprocessorError_shouldKeepPrimaryTranslation() {
    let primary = StubServer::start(vec![StubResponse::ok("Hello world")]).await;
    let fixer = StubServer::start(vec![StubResponse::status(404, "Not Found")]).await;
    let presenter = Arc::new(RecordingPresenter::new());

    let outcome = orchestrator_for(&config_for(&primary.base_url, &fixer.base_url), &presenter)
        .execute_with_outcome(TranslationRequest::new("cs", "en", "Ahoj světe"))
        .await;

    assert!(matches!(outcome, OperationOutcome::SecondaryFailed { .. }));
    assert_eq!(
        presenter.events(),
        vec![
            PresentationEvent::Started,
            PresentationEvent::PrimaryResult("Hello world".to_string()),
            PresentationEvent::SecondaryError,
            PresentationEvent::Ended,
        ]
    );
}

#[tokio::test]
async fn test_pipeline_resubmitted_shouldIssueFreshCallsEachTime() {
    let primary = StubServer::start(vec![StubResponse::status(503, "busy"), StubResponse::ok("Hi")]).await;
    let fixer = StubServer::start(vec![StubResponse::ok("Hi!")]).await;
    let presenter = Arc::new(RecordingPresenter::new());
    let orchestrator = orchestrator_for(&config_for(&primary.base_url, &fixer.base_url), &presenter);

    let first = orchestrator.execute_with_outcome(TranslationRequest::new("cs", "en", "Ahoj")).await;
    let second = orchestrator.execute_with_outcome(TranslationRequest::new("cs", "en", "Ahoj")).await;

    assert_eq!(first, OperationOutcome::PrimaryFailed);
    assert!(second.is_completed());
    assert_eq!(primary.requests().len(), 2);
    assert_eq!(fixer.requests().len(), 1);
    assert_eq!(presenter.count(&PresentationEvent::Ended), 2);
}
