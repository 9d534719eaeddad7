// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use crate::types::workload::WorkloadKind;
use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A request seen by the [`MockService`]
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: bytes::Bytes,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// A mock HTTP service that returns predefined responses based on request paths
/// and records every request it receives.
///
/// PUT requests without a registered response echo the submitted object back
/// with status 200, like an API server accepting a replace.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    /// Answer a list of `kind` in `namespace` with the given items
    pub fn with_workloads(
        self,
        kind: WorkloadKind,
        namespace: &str,
        items: Vec<serde_json::Value>,
    ) -> Self {
        let body = list_json(kind, items);
        self.on_get(&collection_path(kind, namespace), 200, &body)
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Every PUT request received so far, in order
    pub fn updates(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "PUT")
            .collect()
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();

        // Try exact match first
        if let Some(resp) = responses.get(&(method.to_string(), path.to_string())) {
            return Some(resp.clone());
        }

        // Fall back to a prefix match
        for ((m, p), resp) in responses.iter() {
            if m == method && path.starts_with(p) {
                return Some(resp.clone());
            }
        }

        None
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
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
        let service = self.clone();

        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let method = parts.method.to_string();
            let path = parts.uri.path().to_string();
            let body = body.collect().await?.to_bytes();

            service.requests.lock().unwrap().push(RecordedRequest {
                method: method.clone(),
                path: path.clone(),
                query: parts.uri.query().map(str::to_string),
                body: body.clone(),
            });

            let (status, body) = match service.find_response(&method, &path) {
                Some(response) => response,
                None if method == "PUT" => (200, String::from_utf8_lossy(&body).into_owned()),
                None => (404, status_json(404, "NotFound", "not found")),
            };

            Ok::<_, tower::BoxError>(
                Response::builder()
                    .status(status)
                    .header("content-type", "application/json")
                    .body(Body::from(body.into_bytes()))
                    .unwrap(),
            )
        })
    }
}

/// API path of the collection of `kind` in `namespace`
pub fn collection_path(kind: WorkloadKind, namespace: &str) -> String {
    format!("/apis/apps/v1/namespaces/{}/{}", namespace, kind.plural())
}

/// API path of a single workload
pub fn object_path(kind: WorkloadKind, namespace: &str, name: &str) -> String {
    format!("{}/{}", collection_path(kind, namespace), name)
}

/// Create a minimal but valid workload object of `kind`
pub fn workload_json(
    kind: WorkloadKind,
    name: &str,
    namespace: &str,
    annotations: &[(&str, &str)],
) -> serde_json::Value {
    let mut metadata = serde_json::json!({
        "name": name,
        "namespace": namespace,
        "uid": format!("uid-{}", name),
        "resourceVersion": "42",
        "labels": { "app": name }
    });
    if !annotations.is_empty() {
        let map: serde_json::Map<String, serde_json::Value> = annotations
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        metadata["annotations"] = serde_json::Value::Object(map);
    }

    let mut spec = serde_json::json!({
        "selector": { "matchLabels": { "app": name } },
        "template": {
            "metadata": { "labels": { "app": name } },
            "spec": { "containers": [{ "name": "main", "image": "nginx:1.27" }] }
        }
    });
    if kind == WorkloadKind::StatefulSet {
        spec["serviceName"] = serde_json::Value::String(name.to_string());
    }

    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": kind.to_string(),
        "metadata": metadata,
        "spec": spec
    })
}

/// Create a list response for `kind`
pub fn list_json(kind: WorkloadKind, items: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": format!("{}List", kind),
        "metadata": { "resourceVersion": "100" },
        "items": items
    })
    .to_string()
}

/// Create a Status failure response
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}
