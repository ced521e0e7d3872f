//! JSON-lines transport over stdin/stdout.
//!
//! Each input line is a call envelope `{"id", "method", "args"}`. A reader
//! thread validates envelopes and dispatches valid requests to the worker
//! pool. Every reply, including validation failures, is funnelled through one
//! channel and written by the calling thread only, one line per request in
//! completion order.

use std::io::{self, BufRead, BufReader, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Receiver, Sender, unbounded};
use pdftext::{DocError, DocumentService, ErrorBody, Request, Response, ServiceOptions};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{debug, error, info, warn};

/// Code for a method name the transport does not know.
const NOT_IMPLEMENTED: &str = "NOT_IMPLEMENTED";

/// One output line.
#[derive(Debug, Serialize)]
struct Reply {
    id: Value,
    #[serde(flatten)]
    outcome: Outcome,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum Outcome {
    Result(Response),
    Error(ErrorBody),
}

impl Reply {
    fn from_result(id: Value, result: Result<Response, DocError>) -> Self {
        let outcome = match result {
            Ok(response) => Outcome::Result(response),
            Err(err) => Outcome::Error(err.to_body()),
        };
        Self { id, outcome }
    }

    fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            error!(error = %e, "failed to serialize reply");
            json!({
                "id": self.id,
                "error": {"code": "INTERNAL", "message": format!("failed to serialize result: {e}")},
            })
            .to_string()
        })
    }
}

/// An envelope that never reached the extraction core.
#[derive(Debug, PartialEq)]
struct Rejected {
    id: Value,
    body: ErrorBody,
}

impl Rejected {
    fn invalid(id: &Value, err: DocError) -> Self {
        Self {
            id: id.clone(),
            body: err.to_body(),
        }
    }

    fn into_reply(self) -> Reply {
        Reply {
            id: self.id,
            outcome: Outcome::Error(self.body),
        }
    }
}

fn invalid_arguments(msg: impl Into<String>) -> DocError {
    DocError::InvalidArguments(msg.into())
}

fn string_arg(args: &Map<String, Value>, key: &str) -> Result<String, DocError> {
    match args.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(invalid_arguments(format!("field '{key}' must be a string"))),
        None => Err(invalid_arguments(format!("missing required field '{key}'"))),
    }
}

fn page_number(value: &Value, key: &str) -> Result<usize, DocError> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| invalid_arguments(format!("field '{key}' must hold non-negative integers")))
}

fn number_arg(args: &Map<String, Value>, key: &str) -> Result<usize, DocError> {
    let value = args
        .get(key)
        .ok_or_else(|| invalid_arguments(format!("missing required field '{key}'")))?;
    page_number(value, key)
}

fn number_list_arg(args: &Map<String, Value>, key: &str) -> Result<Vec<usize>, DocError> {
    match args.get(key) {
        Some(Value::Array(items)) => items.iter().map(|v| page_number(v, key)).collect(),
        Some(_) => Err(invalid_arguments(format!("field '{key}' must be an array"))),
        None => Err(invalid_arguments(format!("missing required field '{key}'"))),
    }
}

/// Validate one envelope line into its id and a typed request.
fn parse_envelope(line: &str) -> Result<(Value, Request), Rejected> {
    let envelope: Value = serde_json::from_str(line).map_err(|e| {
        Rejected::invalid(&Value::Null, invalid_arguments(format!("request is not valid JSON: {e}")))
    })?;
    let Value::Object(envelope) = envelope else {
        return Err(Rejected::invalid(
            &Value::Null,
            invalid_arguments("request must be a JSON object"),
        ));
    };
    let id = envelope.get("id").cloned().unwrap_or(Value::Null);

    let method = match envelope.get("method") {
        Some(Value::String(m)) => m.as_str(),
        _ => {
            return Err(Rejected::invalid(
                &id,
                invalid_arguments("missing or non-string field 'method'"),
            ));
        }
    };
    if !matches!(method, "initDoc" | "getDocPageText" | "getDocText") {
        return Err(Rejected {
            id,
            body: ErrorBody::new(NOT_IMPLEMENTED, format!("method '{method}' is not implemented")),
        });
    }

    let Some(Value::Object(args)) = envelope.get("args") else {
        return Err(Rejected::invalid(
            &id,
            invalid_arguments("missing or non-object field 'args'"),
        ));
    };

    let request = build_request(method, args).map_err(|e| Rejected::invalid(&id, e))?;
    Ok((id, request))
}

fn build_request(method: &str, args: &Map<String, Value>) -> Result<Request, DocError> {
    let path = string_arg(args, "path")?;
    let password = string_arg(args, "password")?;
    match method {
        "initDoc" => Ok(Request::InitDoc { path, password }),
        "getDocPageText" => Ok(Request::GetDocPageText {
            path,
            password,
            number: number_arg(args, "number")?,
        }),
        "getDocText" => Ok(Request::GetDocText {
            path,
            password,
            missing_pages_numbers: number_list_arg(args, "missingPagesNumbers")?,
        }),
        other => Err(invalid_arguments(format!("unknown method '{other}'"))),
    }
}

/// Read envelopes until EOF, dispatching each valid one to `service`.
///
/// Stops early once the writer has gone away, since no reply could be
/// delivered after that.
fn read_requests<R: BufRead>(input: R, service: &DocumentService, replies: Sender<String>) {
    let writer_gone = Arc::new(AtomicBool::new(false));

    for (line_no, line) in input.lines().enumerate() {
        if writer_gone.load(Ordering::Acquire) {
            debug!("reply writer closed, stopping");
            break;
        }
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "failed to read request stream");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_envelope(&line) {
            Ok((id, request)) => {
                debug!(line = line_no + 1, %id, method = request.method(), "dispatching request");
                let replies = replies.clone();
                let writer_gone = Arc::clone(&writer_gone);
                service.dispatch(request, move |result| {
                    if replies.send(Reply::from_result(id, result).encode()).is_err() {
                        writer_gone.store(true, Ordering::Release);
                    }
                });
            }
            Err(rejected) => {
                warn!(line = line_no + 1, code = %rejected.body.code, "rejected request");
                if replies.send(rejected.into_reply().encode()).is_err() {
                    debug!("reply writer closed, stopping");
                    break;
                }
            }
        }
    }
}

/// Write reply lines until every sender is gone.
fn write_replies<W: Write>(replies: Receiver<String>, mut output: W) -> Result<(), i32> {
    for line in replies {
        writeln!(output, "{line}")
            .and_then(|()| output.flush())
            .map_err(|e| {
                eprintln!("Error: failed to write reply: {e}");
                1
            })?;
    }
    Ok(())
}

/// Serve requests from `input`, writing replies to `output` from this thread.
fn serve<R, W>(input: R, output: W, service: &DocumentService) -> Result<(), i32>
where
    R: BufRead + Send,
    W: Write,
{
    let (tx, rx) = unbounded();
    std::thread::scope(|scope| {
        scope.spawn(move || read_requests(input, service, tx));
        write_replies(rx, output)
    })
}

pub fn run(workers: Option<usize>) -> Result<(), i32> {
    let service = DocumentService::new(ServiceOptions {
        worker_threads: workers,
        ..ServiceOptions::default()
    })
    .map_err(|e| {
        eprintln!("Error: failed to start worker pool: {e}");
        1
    })?;

    info!(workers = service.worker_count(), "serving requests from stdin");
    let result = serve(BufReader::new(io::stdin()), io::stdout().lock(), &service);
    info!("request stream closed");
    result
}
