//! Browser fetch transport. Responses are read to completion before decoding;
//! the caller gets the transport-level success flag alongside the raw body.

use gloo_net::http::Request;
use serde::Serialize;

use crate::ApiError;

pub(crate) async fn post_json<T: Serialize>(
    url: &str,
    body: &T,
) -> Result<(bool, String), ApiError> {
    let response = Request::post(url)
        .json(body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;

    let ok = response.ok();
    let text = response.text().await.map_err(network)?;
    Ok((ok, text))
}

pub(crate) async fn get(url: &str) -> Result<(bool, String), ApiError> {
    let response = Request::get(url).send().await.map_err(network)?;

    let ok = response.ok();
    let text = response.text().await.map_err(network)?;
    Ok((ok, text))
}

fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}
