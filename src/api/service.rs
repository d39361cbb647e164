//! Paste service
//!
//! Wires the query pipeline and keyed writes over one store.

use uuid::Uuid;

use crate::entity::Paste;
use crate::executor::QueryExecutor;
use crate::mirror::DynMirror;
use crate::observability::{log_event_with_fields, Event, MetricsRegistry, Timer};
use crate::projector::{Projector, ResultPage};
use crate::query::{QueryDefaults, QueryParams, QuerySpec};
use crate::store::{RecordStore, WritableStore};

use super::errors::ApiResult;

/// Entry point for every paste operation
pub struct PasteService<S> {
    store: S,
    defaults: QueryDefaults,
    metrics: MetricsRegistry,
    mirror: Option<DynMirror>,
}

impl<S> PasteService<S>
where
    S: RecordStore<Entity = Paste> + WritableStore,
{
    /// Creates a service with default paging and no mirror
    pub fn new(store: S) -> Self {
        Self {
            store,
            defaults: QueryDefaults::default(),
            metrics: MetricsRegistry::new(),
            mirror: None,
        }
    }

    pub fn with_defaults(mut self, defaults: QueryDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Publishes every created paste through `mirror`
    pub fn with_mirror(mut self, mirror: DynMirror) -> Self {
        self.mirror = Some(mirror);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn defaults(&self) -> &QueryDefaults {
        &self.defaults
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Lists pastes matching the request parameters.
    ///
    /// Parameters are fully validated before the store is read. The page is
    /// projected onto `fields` when the request names any.
    pub fn get_all(&self, params: &QueryParams) -> ApiResult<ResultPage<Paste>> {
        let request_id = Uuid::new_v4().to_string();
        let timer = Timer::new();

        log_event_with_fields(
            Event::QueryReceived,
            &[
                ("request_id", &request_id),
                ("query", &params.query),
                ("sortby", &params.sortby),
                ("order", &params.order),
            ],
        );

        let spec = match QuerySpec::build(params, &self.defaults) {
            Ok(spec) => spec,
            Err(e) => {
                self.metrics.increment_queries_rejected();
                log_event_with_fields(
                    Event::QueryRejected,
                    &[
                        ("code", e.code().code()),
                        ("reason", e.message()),
                        ("request_id", &request_id),
                    ],
                );
                return Err(e.into());
            }
        };

        log_event_with_fields(
            Event::QueryValidated,
            &[
                ("filters", &spec.filters().len().to_string()),
                ("limit", &spec.limit().to_string()),
                ("offset", &spec.offset().to_string()),
                ("request_id", &request_id),
                ("sorts", &spec.sorts().len().to_string()),
            ],
        );

        match self.run(&spec) {
            Ok(page) => {
                self.metrics.record_query(page.len() as u64);
                log_event_with_fields(
                    Event::QueryExecuted,
                    &[
                        ("duration_us", &timer.elapsed_us()),
                        ("request_id", &request_id),
                        ("rows", &page.len().to_string()),
                    ],
                );
                Ok(page)
            }
            Err(e) => {
                let event = if e.is_client_error() {
                    self.metrics.increment_queries_rejected();
                    Event::QueryRejected
                } else {
                    self.metrics.increment_queries_failed();
                    Event::QueryFailed
                };
                log_event_with_fields(
                    event,
                    &[
                        ("code", e.code()),
                        ("reason", &e.to_string()),
                        ("request_id", &request_id),
                    ],
                );
                Err(e)
            }
        }
    }

    fn run(&self, spec: &QuerySpec) -> ApiResult<ResultPage<Paste>> {
        Projector::check_fields::<Paste>(spec.projection())?;
        let result = QueryExecutor::new(&self.store).execute(spec)?;
        Ok(Projector::project(result.into_records(), spec.projection())?)
    }

    /// Returns one paste by key
    pub fn get_one(&self, id: i64) -> ApiResult<Paste> {
        Ok(self.store.get(id)?)
    }

    /// Validates and stores a new paste, returning it with its key.
    ///
    /// A configured mirror is tried afterwards; its failure is logged and
    /// counted but does not fail the create.
    pub fn create(&self, mut paste: Paste) -> ApiResult<Paste> {
        paste.validate()?;
        paste.id = self.store.insert(paste.clone())?;

        self.metrics.increment_pastes_created();
        log_event_with_fields(Event::PasteCreated, &[("id", &paste.id.to_string())]);

        if let Some(mirror) = &self.mirror {
            if let Err(e) = mirror.publish(&paste) {
                self.metrics.increment_mirror_failures();
                log_event_with_fields(
                    Event::MirrorFailed,
                    &[
                        ("code", e.code()),
                        ("id", &paste.id.to_string()),
                        ("reason", &e.to_string()),
                    ],
                );
            }
        }

        Ok(paste)
    }

    /// Replaces an existing paste
    pub fn update(&self, paste: Paste) -> ApiResult<Paste> {
        paste.validate()?;
        self.store.update(paste.clone())?;

        self.metrics.increment_pastes_updated();
        log_event_with_fields(Event::PasteUpdated, &[("id", &paste.id.to_string())]);
        Ok(paste)
    }

    /// Removes a paste
    pub fn delete(&self, id: i64) -> ApiResult<()> {
        self.store.delete(id)?;

        self.metrics.increment_pastes_deleted();
        log_event_with_fields(Event::PasteDeleted, &[("id", &id.to_string())]);
        Ok(())
    }
}
