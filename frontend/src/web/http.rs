//! `fetch` transport
//!
//! Implements the core [`HttpClient`] seam on top of `window.fetch`.
//! Multipart bodies become a `FormData`, which lets the browser pick the
//! boundary and the `Content-Type` header.

use async_trait::async_trait;
use js_sys::{Array, Uint8Array};
use storeadmin::ApiError;
use storeadmin::error::ApiResult;
use storeadmin::request::{HttpBody, HttpClient, HttpRequest, HttpResponse};
use storeadmin_shared::protocol::{FormPart, MultipartForm};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};

fn js_error(context: &str, err: JsValue) -> ApiError {
    ApiError::Transport(format!("{}: {:?}", context, err))
}

fn form_data(form: &MultipartForm) -> ApiResult<FormData> {
    let data = FormData::new().map_err(|e| js_error("FormData", e))?;
    for part in &form.parts {
        match part {
            FormPart::Text { name, value } => data
                .append_with_str(name, value)
                .map_err(|e| js_error("FormData text", e))?,
            FormPart::File(file) => {
                let bytes = Uint8Array::from(file.bytes.as_slice());
                let chunks = Array::of1(&bytes);
                let options = BlobPropertyBag::new();
                options.set_type(&file.content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&chunks, &options)
                    .map_err(|e| js_error("Blob", e))?;
                data.append_with_blob_and_filename(&file.field, &blob, &file.file_name)
                    .map_err(|e| js_error("FormData file", e))?;
            }
        }
    }
    Ok(data)
}

/// Browser `fetch` client.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let headers = Headers::new().map_err(|e| js_error("Headers", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| js_error("Headers", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        match &req.body {
            HttpBody::Empty => {}
            HttpBody::Text(text) => opts.set_body(&JsValue::from_str(text)),
            HttpBody::Multipart(form) => opts.set_body(&form_data(form)?.into()),
        }

        let request =
            Request::new_with_str_and_init(&req.url, &opts).map_err(|e| js_error("Request", e))?;
        let window =
            web_sys::window().ok_or_else(|| ApiError::Transport("no window".to_string()))?;

        let value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("fetch", e))?;
        let response: Response = value.dyn_into().map_err(|e| js_error("Response", e))?;

        let text = JsFuture::from(response.text().map_err(|e| js_error("body", e))?)
            .await
            .map_err(|e| js_error("body", e))?;

        Ok(HttpResponse::new(
            response.status(),
            text.as_string().unwrap_or_default(),
        ))
    }
}
