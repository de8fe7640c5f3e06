//! In-memory stand-ins for the store and generator traits, used by unit and
//! router tests so they run without PostgreSQL or a completion endpoint.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{ChatMessage, LlmError, TextGenerator};
use crate::models::options::{CustomOption, OptionKind};
use crate::models::quote::Quote;
use crate::models::review::{NewReview, Review};
use crate::options::catalog::ReferenceData;
use crate::options::store::{CustomOptionStore, CustomOptions};
use crate::review::quote_usage::PrefixQuoteMatcher;
use crate::review::repository::ReviewStore;
use crate::state::AppState;

pub const SCENARIO_QUOTE: &str = "失敗為成功之母，只要不放棄，每一次跌倒都是成長的養分。";

type ErrorFactory = Box<dyn Fn() -> LlmError + Send + Sync>;

/// Returns a fixed reply (or error) and records every transcript it receives.
pub struct ScriptedGenerator {
    reply: Result<String, ErrorFactory>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: impl Fn() -> LlmError + Send + Sync + 'static) -> Self {
        Self {
            reply: Err(Box::new(error)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(make_error) => Err(make_error()),
        }
    }
}

/// Review store backed by a vector. `set_unavailable(true)` makes every call
/// fail the way an unreachable database pool does.
#[derive(Default)]
pub struct MemoryReviewStore {
    reviews: Mutex<Vec<Review>>,
    unavailable: Mutex<bool>,
}

impl MemoryReviewStore {
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    pub fn len(&self) -> usize {
        self.reviews.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), AppError> {
        if *self.unavailable.lock().unwrap() {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn create(&self, review: NewReview) -> Result<Uuid, AppError> {
        self.check()?;
        let mut reviews = self.reviews.lock().unwrap();
        // Strictly increasing timestamps keep "newest first" deterministic.
        let created_at = Utc::now() + Duration::milliseconds(reviews.len() as i64);
        let id = Uuid::new_v4();
        reviews.push(Review {
            id,
            owner_id: review.owner_id,
            student_name: review.student_name,
            positive_traits: review.positive_traits,
            weaknesses: review.weaknesses,
            impressive_points: review.impressive_points,
            suggestions: review.suggestions,
            generated_review: review.generated_review,
            used_quotes: review.used_quotes,
            created_at,
            updated_at: created_at,
        });
        Ok(id)
    }

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Review>, AppError> {
        self.check()?;
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id && r.owner_id == owner_id)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Review>, AppError> {
        self.check()?;
        let mut owned: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn update_text(&self, owner_id: Uuid, id: Uuid, text: &str) -> Result<bool, AppError> {
        self.check()?;
        let mut reviews = self.reviews.lock().unwrap();
        match reviews
            .iter_mut()
            .find(|r| r.id == id && r.owner_id == owner_id)
        {
            Some(review) => {
                review.generated_review = text.to_string();
                review.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        self.check()?;
        let mut reviews = self.reviews.lock().unwrap();
        let before = reviews.len();
        reviews.retain(|r| !(r.id == id && r.owner_id == owner_id));
        Ok(reviews.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryOptionStore {
    options: Mutex<Vec<(Uuid, OptionKind, CustomOption)>>,
    unavailable: Mutex<bool>,
}

impl MemoryOptionStore {
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    fn check(&self) -> Result<(), AppError> {
        if *self.unavailable.lock().unwrap() {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl CustomOptionStore for MemoryOptionStore {
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<CustomOptions, AppError> {
        self.check()?;
        let mut grouped = CustomOptions::default();
        for (owner, kind, option) in self.options.lock().unwrap().iter() {
            if *owner == owner_id {
                grouped.of_kind_mut(*kind).push(option.clone());
            }
        }
        Ok(grouped)
    }

    async fn add(
        &self,
        owner_id: Uuid,
        kind: OptionKind,
        value: &str,
    ) -> Result<CustomOption, AppError> {
        self.check()?;
        let option = CustomOption {
            id: Uuid::new_v4(),
            value: value.to_string(),
        };
        self.options
            .lock()
            .unwrap()
            .push((owner_id, kind, option.clone()));
        Ok(option)
    }

    async fn delete(&self, owner_id: Uuid, kind: OptionKind, id: Uuid) -> Result<bool, AppError> {
        self.check()?;
        let mut options = self.options.lock().unwrap();
        let before = options.len();
        options.retain(|(owner, k, o)| !(*owner == owner_id && *k == kind && o.id == id));
        Ok(options.len() < before)
    }
}

pub fn sample_reference_data() -> ReferenceData {
    ReferenceData {
        positive_traits: vec!["認真負責".to_string(), "樂於助人".to_string()],
        weaknesses: vec!["上課易分心".to_string()],
        suggestions: vec!["多發言".to_string()],
        quotes: vec![
            Quote {
                id: Uuid::new_v4(),
                text: SCENARIO_QUOTE.to_string(),
                author: "X".to_string(),
                category: Some("堅持".to_string()),
            },
            Quote {
                id: Uuid::new_v4(),
                text: "千里之行，始於足下。".to_string(),
                author: "老子".to_string(),
                category: None,
            },
        ],
    }
}

pub struct TestHarness {
    pub state: AppState,
    pub reviews: Arc<MemoryReviewStore>,
    pub options: Arc<MemoryOptionStore>,
    pub llm: Arc<ScriptedGenerator>,
}

pub fn harness(llm: ScriptedGenerator) -> TestHarness {
    let reviews = Arc::new(MemoryReviewStore::default());
    let options = Arc::new(MemoryOptionStore::default());
    let llm = Arc::new(llm);

    let state = AppState {
        reviews: reviews.clone(),
        custom_options: options.clone(),
        llm: llm.clone(),
        quote_matcher: Arc::new(PrefixQuoteMatcher::default()),
        reference: Arc::new(sample_reference_data()),
    };

    TestHarness {
        state,
        reviews,
        options,
        llm,
    }
}
