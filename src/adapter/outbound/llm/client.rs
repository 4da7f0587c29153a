//! Test doubles for the [`Llm`](crate::port::outbound::llm::Llm) port.

/// Scripted LLMs for testing.
#[cfg(test)]
pub mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::{Error, Result};
    use crate::port::outbound::llm::Llm;

    /// Answers every prompt with the same text and records the prompts.
    pub struct MockLlm {
        response: String,
        prompts: Mutex<Vec<String>>,
    }

    impl MockLlm {
        pub fn new(response: impl Into<String>) -> Self {
            Self {
                response: response.into(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Llm for MockLlm {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.response.clone())
        }
    }

    /// Fails every call like an unreachable provider.
    pub struct FailingLlm;

    #[async_trait]
    impl Llm for FailingLlm {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(Error::Connection("provider unavailable".into()))
        }
    }
}

#[cfg(test)]
mod internal_tests {
    use super::tests::{FailingLlm, MockLlm};
    use crate::port::outbound::llm::Llm;

    #[tokio::test]
    async fn mock_llm_records_prompts() {
        let llm = MockLlm::new(r#"{"_question": null}"#);
        let result = llm.complete("first").await.unwrap();
        assert_eq!(result, r#"{"_question": null}"#);
        assert_eq!(llm.prompts(), ["first".to_string()]);
    }

    #[tokio::test]
    async fn failing_llm_errors() {
        assert!(FailingLlm.complete("x").await.is_err());
    }
}
