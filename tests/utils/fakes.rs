/// In-memory providers with scripted behaviour
///
/// Every fake records the calls it receives so tests can assert on query
/// order and on which providers were consulted.
use async_trait::async_trait;
use miru_mapping_lib::modules::media::{Candidate, MediaEntity, MediaFormat, MetadataPatch};
use miru_mapping_lib::modules::provider::{
    FieldPolicy, InfoProvider, ProviderDescriptor, ProviderType, SearchProvider, SearchRequest,
};
use miru_mapping_lib::shared::errors::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
pub enum SearchBehavior {
    Results(Vec<Candidate>),
    Nothing,
    Fail,
    /// Never answers within any sane timeout
    Hang,
}

pub struct FakeSearchProvider {
    descriptor: ProviderDescriptor,
    responses: HashMap<String, SearchBehavior>,
    queries: Mutex<Vec<String>>,
    cancelled: Arc<AtomicBool>,
}

impl FakeSearchProvider {
    pub fn new(id: &str, provider_type: ProviderType) -> Self {
        Self {
            descriptor: ProviderDescriptor::new(id, provider_type),
            responses: HashMap::new(),
            queries: Mutex::new(Vec::new()),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_descriptor(
        mut self,
        update: impl FnOnce(ProviderDescriptor) -> ProviderDescriptor,
    ) -> Self {
        self.descriptor = update(self.descriptor);
        self
    }

    pub fn with_formats(self, formats: &[MediaFormat]) -> Self {
        let formats = formats.to_vec();
        self.with_descriptor(|d| d.with_formats(formats))
    }

    /// Answer `query` with candidates tagged with this provider's id
    pub fn respond(mut self, query: &str, titles: &[(&str, &str)]) -> Self {
        let provider_id = self.descriptor.id.clone();
        let candidates = titles
            .iter()
            .map(|(id, title)| Candidate::new(*id, *title, provider_id.as_str()))
            .collect();
        self.responses
            .insert(query.to_string(), SearchBehavior::Results(candidates));
        self
    }

    pub fn respond_with(mut self, query: &str, behavior: SearchBehavior) -> Self {
        self.responses.insert(query.to_string(), behavior);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Whether a request's cancellation token has fired
    pub fn saw_cancellation(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for FakeSearchProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    async fn search(&self, request: SearchRequest) -> AppResult<Option<Vec<Candidate>>> {
        self.queries.lock().unwrap().push(request.query.clone());

        let behavior = self
            .responses
            .get(&request.query)
            .cloned()
            .unwrap_or(SearchBehavior::Nothing);

        match behavior {
            SearchBehavior::Results(candidates) => Ok(Some(candidates)),
            SearchBehavior::Nothing => Ok(None),
            SearchBehavior::Fail => Err(AppError::ProviderError(format!(
                "{} is down",
                self.descriptor.id
            ))),
            SearchBehavior::Hang => {
                let flag = Arc::clone(&self.cancelled);
                let token = request.cancel.clone();
                tokio::spawn(async move {
                    token.cancelled().await;
                    flag.store(true, Ordering::SeqCst);
                });
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(None)
            }
        }
    }
}

#[derive(Clone)]
pub enum InfoBehavior {
    Patch(MetadataPatch),
    Nothing,
    Fail,
    Hang,
}

pub struct FakeInfoProvider {
    descriptor: ProviderDescriptor,
    behavior: InfoBehavior,
    calls: AtomicUsize,
}

impl FakeInfoProvider {
    pub fn new(id: &str, behavior: InfoBehavior) -> Self {
        Self {
            descriptor: ProviderDescriptor::new(id, ProviderType::Information),
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_policy(mut self, policy: FieldPolicy) -> Self {
        self.descriptor = self.descriptor.with_field_policy(policy);
        self
    }

    pub fn with_type(mut self, provider_type: ProviderType) -> Self {
        self.descriptor.provider_type = provider_type;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InfoProvider for FakeInfoProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    async fn info(&self, _media: &MediaEntity) -> AppResult<Option<MetadataPatch>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            InfoBehavior::Patch(patch) => Ok(Some(patch.clone())),
            InfoBehavior::Nothing => Ok(None),
            InfoBehavior::Fail => Err(AppError::ProviderError(format!(
                "{} returned malformed data",
                self.descriptor.id
            ))),
            InfoBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(None)
            }
        }
    }
}
