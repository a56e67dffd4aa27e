// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that answers GET requests from a fixed table of paths.
/// Unknown paths get a 404 Status.
#[derive(Clone, Default)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<String, (u16, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let response = if req.method() == http::Method::GET {
            self.responses.lock().unwrap().get(req.uri().path()).cloned()
        } else {
            None
        };
        let (status, body) = response.unwrap_or_else(|| (404, not_found_json("resource", req.uri().path())));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// A cluster-scoped Sail operator resource as returned by the API server
pub fn mesh_resource_json(kind: &str, name: &str, uid: Option<&str>) -> String {
    let mut metadata = serde_json::json!({ "name": name });
    if let Some(uid) = uid {
        metadata["uid"] = serde_json::Value::String(uid.to_string());
    }

    serde_json::json!({
        "apiVersion": "sailoperator.io/v1",
        "kind": kind,
        "metadata": metadata,
        "spec": {
            "version": "v1.24.0"
        }
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}
