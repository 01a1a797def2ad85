use crate::core::input::ItineraryForm;
use crate::core::prompt::{build_prompt, clean_completion};
use crate::domain::model::{ItineraryResult, RawItineraryInput, TripDuration};
use crate::domain::ports::CompletionClient;
use crate::utils::error::{OrganizerError, Result};
use std::sync::Arc;
use std::time::Instant;

/// 行程整理服務：驗證後的輸入 → 提示詞 → 單次 LLM 請求 → 結果
#[derive(Clone)]
pub struct ItineraryService {
    client: Arc<dyn CompletionClient>,
    model: String,
}

impl ItineraryService {
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 先驗證表單，驗證失敗時不會發出任何網路請求
    pub async fn organize_form(&self, form: &ItineraryForm) -> Result<ItineraryResult> {
        let (duration, input) = form.validate()?;
        self.organize(&duration, &input).await
    }

    pub async fn organize(
        &self,
        duration: &TripDuration,
        input: &RawItineraryInput,
    ) -> Result<ItineraryResult> {
        let request = build_prompt(duration, input, &self.model);
        tracing::info!(
            "🧭 Organizing {} itinerary ({} chars of raw input) with {}",
            duration.describe(),
            input.as_str().chars().count(),
            self.model
        );

        let started = Instant::now();
        let completion = self.client.submit_completion(&request).await?;
        tracing::debug!(
            "LLM responded in {:?} with {} chars",
            started.elapsed(),
            completion.chars().count()
        );

        if completion.trim().is_empty() {
            return Err(OrganizerError::empty_response(
                "the model returned a blank completion",
            ));
        }

        Ok(ItineraryResult {
            text: clean_completion(&completion),
            model: self.model.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prompt::{ACTIVITY_MARKER, DAY_HEADER_MARKER};
    use crate::domain::model::PromptRequest;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 固定回應的測試替身，記錄收到的請求
    struct FixtureClient {
        response: std::result::Result<String, fn() -> OrganizerError>,
        requests: Mutex<Vec<PromptRequest>>,
    }

    impl FixtureClient {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(text.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing(make_error: fn() -> OrganizerError) -> Arc<Self> {
            Arc::new(Self {
                response: Err(make_error),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn last_request(&self) -> Option<PromptRequest> {
            self.requests.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl CompletionClient for FixtureClient {
        async fn submit_completion(&self, request: &PromptRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(make_error) => Err(make_error()),
            }
        }
    }

    fn three_day_plan() -> String {
        format!(
            "{h}Day 1 : Museum Morning\n{a} Visit the museum.\n\n\
             {h}Day 2 : City Highlights\n{a} Join the city tour.\n\n\
             {h}Day 3 : Departure\n{a} Airport transfer.",
            h = DAY_HEADER_MARKER,
            a = ACTIVITY_MARKER
        )
    }

    #[tokio::test]
    async fn test_organize_returns_completion_unmodified() {
        let client = FixtureClient::replying(&three_day_plan());
        let service = ItineraryService::new(client.clone(), "gemini-pro");

        let form = ItineraryForm {
            duration: "custom".to_string(),
            custom_duration: "3 days, 2 nights".to_string(),
            raw_itinerary: "Day trip to museum, city tour, airport transfer".to_string(),
            ..ItineraryForm::default()
        };

        let result = service.organize_form(&form).await.unwrap();

        assert_eq!(result.text, three_day_plan());
        assert_eq!(result.model, "gemini-pro");

        let request = client.last_request().unwrap();
        assert!(request.prompt.contains("create a 3-day, 2-night itinerary"));
        for component in ["Day trip to museum", "city tour", "airport transfer"] {
            assert!(request.prompt.contains(component));
        }
    }

    #[tokio::test]
    async fn test_invalid_form_never_calls_client() {
        let client = FixtureClient::replying(&three_day_plan());
        let service = ItineraryService::new(client.clone(), "gemini-pro");

        let form = ItineraryForm {
            raw_itinerary: "  ".to_string(),
            ..ItineraryForm::default()
        };

        let err = service.organize_form(&form).await.unwrap_err();
        assert!(matches!(err, OrganizerError::ValidationError { .. }));
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_completion_is_empty_response() {
        let client = FixtureClient::replying("  \n ");
        let service = ItineraryService::new(client.clone(), "gemini-pro");

        let err = service
            .organize_form(&ItineraryForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OrganizerError::EmptyResponseError { .. }));
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_client_errors_are_propagated() {
        let client = FixtureClient::failing(|| OrganizerError::request("status 500"));
        let service = ItineraryService::new(client.clone(), "gemini-pro");

        let err = service
            .organize_form(&ItineraryForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OrganizerError::RequestError { .. }));
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_preamble_is_stripped() {
        let text = format!("Here you go!\n{}", three_day_plan());
        let client = FixtureClient::replying(&text);
        let service = ItineraryService::new(client, "gemini-pro");

        let result = service
            .organize_form(&ItineraryForm::default())
            .await
            .unwrap();
        assert_eq!(result.text, three_day_plan());
    }
}
