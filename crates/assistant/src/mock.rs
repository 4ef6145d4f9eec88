use async_trait::async_trait;
use campus_core::{assistant::ChatGateway, errors::CampusResult};
use mockall::mock;

// Mock gateway for testing
mock! {
    pub ChatGateway {}

    #[async_trait]
    impl ChatGateway for ChatGateway {
        async fn send_message(&self, prompt: &str) -> CampusResult<String>;
    }
}
