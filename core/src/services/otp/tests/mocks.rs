//! Mock implementations for testing the lifecycle service

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::repositories::MockOtpTokenRepository;
use crate::services::otp::{
    Notifier, OtpService, OtpServiceConfig, PhoneValidator, RegexPhoneValidator,
};

// Mock notifier recording every delivery
pub struct MockNotifier {
    pub deliveries: Mutex<Vec<(String, String)>>,
    pub should_fail: AtomicBool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }

    pub fn codes_for(&self, phone: &str) -> Vec<String> {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == phone)
            .map(|(_, code)| code.clone())
            .collect()
    }

    pub fn last_code(&self, phone: &str) -> Option<String> {
        self.codes_for(phone).pop()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn deliver(&self, phone: &str, code: &str) -> Result<String, String> {
        self.deliveries
            .lock()
            .unwrap()
            .push((phone.to_string(), code.to_string()));
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("SMS gateway unavailable".to_string());
        }
        Ok(format!("mock-msg-{}", self.delivery_count()))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

pub type TestService = OtpService<MockOtpTokenRepository, MockNotifier>;

pub fn build_service() -> (TestService, Arc<MockOtpTokenRepository>, Arc<MockNotifier>) {
    build_service_with_config(OtpServiceConfig::default())
}

pub fn build_service_with_config(
    config: OtpServiceConfig,
) -> (TestService, Arc<MockOtpTokenRepository>, Arc<MockNotifier>) {
    let repository = Arc::new(MockOtpTokenRepository::new());
    let notifier = Arc::new(MockNotifier::new());
    let validator: Arc<dyn PhoneValidator> = Arc::new(RegexPhoneValidator::default());

    let service = OtpService::new(repository.clone(), notifier.clone(), validator, config);
    (service, repository, notifier)
}
