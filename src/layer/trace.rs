//! Tracing layer recording the outcome of every dispatch

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use tower_layer::Layer;
use tower_service::Service;

use crate::service::{DispatchRequest, DispatchResponse};

/// Layer that logs agent id, outcome and latency of each dispatch
#[derive(Clone, Debug, Default)]
pub struct DispatchTraceLayer;

impl DispatchTraceLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for DispatchTraceLayer {
    type Service = DispatchTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DispatchTraceService { inner }
    }
}

/// Service produced by [`DispatchTraceLayer`]
#[derive(Clone, Debug)]
pub struct DispatchTraceService<S> {
    inner: S,
}

impl<S> Service<DispatchRequest> for DispatchTraceService<S>
where
    S: Service<DispatchRequest, Response = DispatchResponse>,
    S::Future: Send + 'static,
{
    type Response = DispatchResponse;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: DispatchRequest) -> Self::Future {
        let agent_id = req.agent_id.clone();
        let started = Instant::now();
        let future = self.inner.call(req);

        Box::pin(async move {
            let response = future.await?;
            let elapsed_ms = started.elapsed().as_millis() as u64;
            let outcome = response.outcome();

            match response {
                DispatchResponse::Task(_) => {
                    tracing::info!(%agent_id, outcome, elapsed_ms, "dispatched")
                }
                _ => tracing::warn!(
                    %agent_id,
                    outcome,
                    status = response.http_status(),
                    elapsed_ms,
                    "dispatch rejected"
                ),
            }

            Ok(response)
        })
    }
}
