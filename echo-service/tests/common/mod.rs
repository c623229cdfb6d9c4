use echo_service::config::{EchoConfig, LineConfig};
use echo_service::startup::Application;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use service_core::utils::signature::generate_signature;

pub const TEST_CHANNEL_SECRET: &str = "test-channel-secret";

/// Configuration with the real provider disabled so replies go to the mock.
pub fn test_config() -> EchoConfig {
    EchoConfig {
        common: CoreConfig {
            port: 0,
            log_level: "error".to_string(),
        },
        line: LineConfig {
            channel_access_token: Secret::new("test-access-token".to_string()),
            channel_secret: Secret::new(TEST_CHANNEL_SECRET.to_string()),
            api_base_url: "https://api.line.me".to_string(),
            enabled: false, // use the mock provider
        },
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let app = Application::build(test_config())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to come up by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }

    /// Compute the callback signature header value for a raw body.
    pub fn sign(&self, body: &str) -> String {
        generate_signature(TEST_CHANNEL_SECRET, body.as_bytes())
            .expect("Failed to generate signature")
    }
}
