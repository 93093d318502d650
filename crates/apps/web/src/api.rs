use gloo_net::http::{Request, Response};
use protocol::{
    ADAPT_PATH, AdaptRequest, AdaptResponse, ApiError, FILE_PART, INGEST_PATH, IngestResponse,
    endpoint_url,
};
use runtime::IngestJob;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

fn transport(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

fn js_error(e: JsValue) -> ApiError {
    ApiError::Network(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let body = resp.text().await.map_err(transport)?;
    if !resp.ok() {
        return Err(ApiError::from_response(
            resp.status(),
            &resp.status_text(),
            &body,
        ));
    }
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn post_adapt(base: &str, request: &AdaptRequest) -> Result<AdaptResponse, ApiError> {
    let url = endpoint_url(base, ADAPT_PATH);
    let resp = Request::post(&url)
        .json(request)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    read_json(resp).await
}

pub async fn post_ingest(base: &str, job: &IngestJob<File>) -> Result<IngestResponse, ApiError> {
    let url = endpoint_url(base, INGEST_PATH);
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(FILE_PART, &job.file, &job.file_name)
        .map_err(js_error)?;
    for (name, value) in job.fields.form_parts() {
        form.append_with_str(name, value).map_err(js_error)?;
    }
    let resp = Request::post(&url)
        .body(form)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    read_json(resp).await
}
