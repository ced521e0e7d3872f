//! Request handling on a background worker pool.
//!
//! [`handle`] is the synchronous core: open the document named by a
//! [`Request`], run the requested operation, drop the document.
//! [`DocumentService`] runs that core on a dedicated rayon pool and hands each
//! result back through a single-assignment [`Completion`] or a callback.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crossbeam_channel::{Receiver, TryRecvError, bounded};
use pdftext_core::{DocError, DocumentMetadata, Request, Response};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use tracing::{debug, error, info};

use crate::document::Document;

/// Run one request to completion on the current thread.
///
/// The document is opened from the request's path and password, used once,
/// and dropped before returning.
///
/// # Errors
///
/// Returns the [`DocError`] from opening the document, or
/// [`DocError::PageNotFound`] for a single-page request past the end.
/// Batch requests never fail for per-page reasons.
pub fn handle(request: &Request) -> Result<Response, DocError> {
    debug!(method = request.method(), path = request.path(), "handling request");
    let doc = Document::open_file(request.path(), request.password())?;

    let response = match request {
        Request::InitDoc { .. } => Response::Metadata(doc.metadata()),
        Request::GetDocPageText { number, .. } => Response::PageText(doc.extract_page(*number)?),
        Request::GetDocText {
            missing_pages_numbers,
            ..
        } => Response::Texts(doc.extract_pages(missing_pages_numbers)),
    };
    Ok(response)
}

/// Options controlling the worker pool.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Number of worker threads (default: None = one per logical CPU).
    pub worker_threads: Option<usize>,
    /// Prefix for worker thread names (default: "pdftext-worker").
    pub thread_name_prefix: String,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            worker_threads: None,
            thread_name_prefix: "pdftext-worker".to_string(),
        }
    }
}

/// The pending result of a request submitted to a [`DocumentService`].
///
/// Receives exactly one value. Observe it from whichever thread the caller's
/// transport needs results on.
#[derive(Debug)]
pub struct Completion<T> {
    rx: Receiver<Result<T, DocError>>,
}

impl<T> Completion<T> {
    /// Block until the request finishes and return its result.
    ///
    /// # Errors
    ///
    /// Returns the request's own error, or [`DocError::Internal`] if the
    /// worker went away without producing a result.
    pub fn wait(self) -> Result<T, DocError> {
        self.rx.recv().unwrap_or_else(|_| {
            Err(DocError::Internal(
                "worker dropped the request without a result".to_string(),
            ))
        })
    }

    /// Take the result if it has arrived, without blocking.
    ///
    /// Returns `None` while the request is still running. The result is
    /// delivered once: after `try_wait` has returned it, the completion is
    /// spent and later calls yield `None` or [`DocError::Internal`].
    pub fn try_wait(&self) -> Option<Result<T, DocError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(DocError::Internal(
                "worker dropped the request without a result".to_string(),
            ))),
        }
    }
}

/// Runs document requests on a dedicated background pool.
///
/// Requests share no state: each opens its own document from the path and
/// password it carries. There is no cancellation; a submitted request runs
/// until it succeeds or fails.
pub struct DocumentService {
    pool: ThreadPool,
}

impl std::fmt::Debug for DocumentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentService")
            .field("workers", &self.pool.current_num_threads())
            .finish()
    }
}

impl DocumentService {
    /// Start a service with its own worker pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread pool cannot be created.
    pub fn new(options: ServiceOptions) -> Result<Self, ThreadPoolBuildError> {
        let prefix = options.thread_name_prefix;
        let mut builder = ThreadPoolBuilder::new().thread_name(move |i| format!("{prefix}-{i}"));
        if let Some(threads) = options.worker_threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;
        info!(workers = pool.current_num_threads(), "document service started");
        Ok(Self { pool })
    }

    /// Number of worker threads in the pool.
    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Submit a request and have `on_complete` called with its result.
    ///
    /// `on_complete` runs once, on the worker. Forward the result (for
    /// example over a channel) to the thread that must observe it.
    pub fn dispatch<F>(&self, request: Request, on_complete: F)
    where
        F: FnOnce(Result<Response, DocError>) + Send + 'static,
    {
        self.spawn(move || handle(&request), on_complete);
    }

    /// Submit a request and receive its result through a [`Completion`].
    pub fn call(&self, request: Request) -> Completion<Response> {
        self.run(move || handle(&request))
    }

    /// Submit an `initDoc` request.
    pub fn init_doc(
        &self,
        path: impl Into<String>,
        password: impl Into<String>,
    ) -> Completion<DocumentMetadata> {
        let (path, password) = (path.into(), password.into());
        self.run(move || Document::open_file(&path, &password).map(|doc| doc.metadata()))
    }

    /// Submit a `getDocPageText` request for one 1-based page.
    pub fn get_doc_page_text(
        &self,
        path: impl Into<String>,
        password: impl Into<String>,
        number: usize,
    ) -> Completion<String> {
        let (path, password) = (path.into(), password.into());
        self.run(move || Document::open_file(&path, &password)?.extract_page(number))
    }

    /// Submit a `getDocText` request for several 1-based pages.
    pub fn get_doc_text(
        &self,
        path: impl Into<String>,
        password: impl Into<String>,
        missing_pages_numbers: Vec<usize>,
    ) -> Completion<Vec<String>> {
        let (path, password) = (path.into(), password.into());
        self.run(move || {
            Document::open_file(&path, &password)
                .map(|doc| doc.extract_pages(&missing_pages_numbers))
        })
    }

    fn run<T, J>(&self, job: J) -> Completion<T>
    where
        T: Send + 'static,
        J: FnOnce() -> Result<T, DocError> + Send + 'static,
    {
        let (tx, rx) = bounded(1);
        self.spawn(job, move |result| {
            // The caller may have dropped its Completion.
            let _ = tx.send(result);
        });
        Completion { rx }
    }

    fn spawn<T, J, F>(&self, job: J, on_complete: F)
    where
        T: Send + 'static,
        J: FnOnce() -> Result<T, DocError> + Send + 'static,
        F: FnOnce(Result<T, DocError>) + Send + 'static,
    {
        self.pool.spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(job)).unwrap_or_else(|payload| {
                let msg = panic_message(payload.as_ref());
                error!(%msg, "document worker panicked");
                Err(DocError::Internal(format!("worker panicked: {msg}")))
            });
            on_complete(result);
        });
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
