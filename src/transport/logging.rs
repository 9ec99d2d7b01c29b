// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower layer that records every JSON-RPC call made to a chain endpoint.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket};
use alloy_transport::TransportError;
use tower::Layer;
use tracing::{debug, warn, Instrument};

use crate::chain::Chain;

/// A Tower layer that wraps each RPC call in a span tagged with the chain.
///
/// Successful calls are logged at `debug`, failed calls at `warn`, both with
/// the method name and the elapsed time.
///
/// # Example
///
/// ```rust,ignore
/// use blockstamp::transport::LoggingLayer;
/// use blockstamp::Chain;
/// use alloy_rpc_client::ClientBuilder;
///
/// let client = ClientBuilder::default()
///     .layer(LoggingLayer::new(Chain::Solana))
///     .http(rpc_url);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct LoggingLayer {
    chain: Chain,
}

impl LoggingLayer {
    /// Creates a logging layer for calls to `chain`'s endpoint
    pub fn new(chain: Chain) -> Self {
        Self { chain }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        LoggingService {
            service,
            chain: self.chain,
        }
    }
}

/// A Tower service that logs RPC requests and their outcome.
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    service: S,
    chain: Chain,
}

impl<S> tower::Service<RequestPacket> for LoggingService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send + 'static,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let method = method_label(&request);
        let span = tracing::debug_span!("rpc_call", chain = %self.chain, method = %method);
        let call = self.service.call(request);

        Box::pin(
            async move {
                let start = Instant::now();
                let result = call.await;
                let duration_ms = start.elapsed().as_millis() as u64;

                match &result {
                    Ok(_) => debug!(duration_ms, "RPC call completed"),
                    Err(e) => warn!(error = %e, duration_ms, "RPC call failed"),
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Method name of a request, or a summary for batches
fn method_label(request: &RequestPacket) -> String {
    match request {
        RequestPacket::Single(req) => req.method().to_string(),
        RequestPacket::Batch(reqs) => match reqs.as_slice() {
            [] => "batch(empty)".to_string(),
            [only] => only.method().to_string(),
            many => format!("batch({} calls)", many.len()),
        },
    }
}
