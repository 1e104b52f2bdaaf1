//! Operation dispatcher
//!
//! Resolves a function name, validates the positional arguments, and routes the
//! call to the record store or the query engine. Invocations are serialized behind
//! one global mutex, so the create existence check and write are atomic per key.

use std::sync::{Arc, Mutex};

use crate::observability::{log_event_at, Event, MetricsRegistry, Severity as LogSeverity};
use crate::query::{encode_envelopes, QueryEngine};
use crate::record::{validator, Attribute, InfoRecord};
use crate::state::StateBackend;
use crate::store::InfoStore;

use super::errors::{ApiError, ApiResult};
use super::request::{Function, Request};
use super::response::Response;

/// Dispatcher with global execution lock
pub struct InfoShareHandler<B: ?Sized> {
    /// Global mutex for serialized execution
    lock: Mutex<()>,
    store: InfoStore<Arc<B>>,
    engine: QueryEngine<Arc<B>>,
    metrics: MetricsRegistry,
}

impl<B: StateBackend + ?Sized> InfoShareHandler<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            lock: Mutex::new(()),
            store: InfoStore::new(Arc::clone(&backend)),
            engine: QueryEngine::new(backend),
            metrics: MetricsRegistry::new(),
        }
    }

    /// Returns the shared backend
    pub fn backend(&self) -> &B {
        self.store.state()
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Handle a raw JSON request line
    pub fn handle(&self, json_request: &str) -> Response {
        match Request::parse(json_request) {
            Ok(request) => self.invoke(&request.function, &request.args),
            Err(e) => Response::error(&e),
        }
    }

    /// Invoke `function` with positional `args`
    pub fn invoke(&self, function: &str, args: &[String]) -> Response {
        // guards no data, so a poisoned lock is still usable
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());

        log_event_at(
            LogSeverity::Trace,
            Event::InvokeReceived,
            &[("args", &args.len().to_string()), ("function", function)],
        );

        let function = match Function::from_name(function) {
            Some(f) => f,
            None => {
                log_event_at(LogSeverity::Warn, Event::InvokeUnknown, &[("function", function)]);
                return Response::error(&ApiError::unknown_function());
            }
        };

        let result = match (function, function.attribute()) {
            (_, Some(attribute)) => self.handle_query(attribute, args).map(Some),
            (Function::Create, None) => self.handle_create(args).map(|()| None),
            (_, None) => self.handle_read(args).map(Some),
        };

        match result {
            Ok(Some(payload)) => Response::success(payload),
            Ok(None) => Response::ok(),
            Err(e) => Response::error(&e),
        }
    }

    /// Flow:
    /// 1. Validate count, then each argument
    /// 2. Build normalized record
    /// 3. Create-if-absent
    fn handle_create(&self, args: &[String]) -> ApiResult<()> {
        let outcome = InfoRecord::from_args(args)
            .map_err(ApiError::from)
            .and_then(|record| self.store.create(&record).map_err(ApiError::from));

        match outcome {
            Ok(()) => {
                self.metrics.increment_records_created();
                Ok(())
            }
            Err(e) => {
                self.metrics.increment_creates_rejected();
                log_event_at(
                    LogSeverity::Warn,
                    Event::RecordRejected,
                    &[("code", e.code().code()), ("reason", e.message())],
                );
                Err(e)
            }
        }
    }

    fn handle_read(&self, args: &[String]) -> ApiResult<Vec<u8>> {
        validator::expect_exactly(args, 1, "Expecting ID of the info to query")?;
        validator::require_non_empty(args, 1)?;

        match self.store.read(&args[0]) {
            Ok(bytes) => {
                self.metrics.increment_reads_served();
                Ok(bytes)
            }
            Err(e) => {
                self.metrics.increment_reads_missed();
                log_event_at(
                    LogSeverity::Info,
                    Event::RecordMissing,
                    &[("error", &e.to_string()), ("key", &args[0])],
                );
                Err(e.into())
            }
        }
    }

    /// Extra arguments past the first are ignored
    fn handle_query(&self, attribute: Attribute, args: &[String]) -> ApiResult<Vec<u8>> {
        validator::expect_at_least(args, 1, "Expecting 1")?;
        validator::require_non_empty(args, 1)?;

        let envelopes = match self.engine.query_by_attribute(attribute, &args[0]) {
            Ok(envelopes) => envelopes,
            Err(e) => {
                self.metrics.increment_queries_failed();
                return Err(e.into());
            }
        };

        let encoded = encode_envelopes(&envelopes)?;
        self.metrics.record_query(envelopes.len());
        Ok(encoded)
    }
}
