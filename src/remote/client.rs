use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PlanError, Result};
use crate::models::{MealSlot, MealType};
use crate::planner::MacroUpload;
use crate::remote::retry::{Attempt, RetryPolicy};

/// Anything that can produce a server recommendation for one meal.
pub trait RecommendationService {
    fn recommend(&self, day: u32, hall: &str, meal: MealType) -> Result<MealSlot>;
}

#[derive(Debug, Serialize)]
struct RecommendRequest<'a> {
    day: u32,
    hall: &'a str,
    meal_type: MealType,
}

#[derive(Debug, Default, Deserialize)]
struct RegisterResponse {
    #[serde(default)]
    success: Option<bool>,
}

/// Blocking HTTP client for the meal recommendation backend.
///
/// The backend tracks the user by session cookie, so one client instance
/// should be reused for a register → upload → sync sequence.
pub struct RemoteClient {
    base: String,
    http: Client,
    retry: RetryPolicy,
}

impl RemoteClient {
    pub fn new(base: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            http,
            retry: RetryPolicy::default(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base, endpoint)
    }

    /// Open a session. A non-success answer carrying `success: false` is
    /// retried per the retry policy. Returns whether the server accepted.
    pub fn register(&self) -> Result<bool> {
        let url = self.url("register");
        self.retry.run(|attempt| {
            log::debug!("GET {} (attempt {})", url, attempt + 1);
            let response = self.http.get(&url).send()?;
            if response.status().is_success() {
                return Ok(Attempt::Done(true));
            }

            let status = response.status().as_u16();
            let body: RegisterResponse = response.json().unwrap_or_default();
            if body.success == Some(false) {
                log::warn!("register rejected with {}", status);
                Ok(Attempt::Retry(false))
            } else {
                Ok(Attempt::Done(false))
            }
        })
    }

    /// Upload the quick macro targets.
    pub fn upload_macros(&self, macros: &MacroUpload) -> Result<()> {
        let url = self.url("update_user_macs");
        log::info!("sending macros {:?}", macros);
        let response = self.http.post(&url).json(macros).send()?;
        if !response.status().is_success() {
            return Err(PlanError::RemoteStatus {
                endpoint: url,
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}

impl RecommendationService for RemoteClient {
    fn recommend(&self, day: u32, hall: &str, meal: MealType) -> Result<MealSlot> {
        let url = self.url("recommend");
        let request = RecommendRequest {
            day,
            hall,
            meal_type: meal,
        };
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            return Err(PlanError::RemoteStatus {
                endpoint: url,
                status: response.status().as_u16(),
            });
        }

        let text = response.text()?;
        if text.trim().is_empty() {
            return Ok(MealSlot::Empty);
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(MealSlot::from_value(&value).with_hall(hall)),
            Err(e) => {
                log::warn!("recommend response for day {} {} is not JSON: {}", day, meal, e);
                Ok(MealSlot::Empty)
            }
        }
    }
}
