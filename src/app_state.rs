use crate::{config::Config, fetcher::FetchPolicy};

#[derive(Clone)]
pub struct AppState {
    policy: FetchPolicy,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            policy: config.server_fetch_policy(),
        }
    }

    pub fn with_policy(policy: FetchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }
}
