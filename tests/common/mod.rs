#![allow(dead_code)]

use std::path::Path;

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
};
use http_body_util::BodyExt;
use product_catalog::{app::App, configuration::Configuration, rest};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

pub const BASE_URL: &str = "http://catalog.example:5100";

pub fn config(dir: &Path, seed: bool) -> Configuration {
    Configuration {
        external_base_url: BASE_URL.to_string(),
        data_dir: dir.join("data"),
        pics_dir: dir.join("pics"),
        api_listen: "127.0.0.1:0".parse().unwrap(),
        log_file: None,
        reset: false,
        seed,
    }
}

pub fn app(dir: &Path, seed: bool) -> App {
    App::new(config(dir, seed)).expect("app wiring")
}

pub async fn send(
    app: &App,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    rest::router(app.state())
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

pub async fn json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
