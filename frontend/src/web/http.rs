//! HTTP 请求封装模块
//!
//! 基于 `web_sys::fetch` 实现 `geotrack_shared::request::HttpClient`。
//! 任何 HTTP 状态码都作为响应返回，只有 fetch 本身失败才是网络错误。

use async_trait::async_trait;
use geotrack_shared::error::{ApiError, ApiResult};
use geotrack_shared::request::{FormField, HttpClient, HttpRequest, HttpResponse, RequestBody};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};

fn js_error(e: JsValue) -> ApiError {
    ApiError::network(format!("{:?}", e))
}

/// 组装 multipart 表单
///
/// 不设置 Content-Type，由浏览器生成带 boundary 的值。
fn form_data(fields: &[(String, FormField)]) -> ApiResult<FormData> {
    let form = FormData::new().map_err(js_error)?;
    for (name, field) in fields {
        match field {
            FormField::Text(value) => form.append_with_str(name, value).map_err(js_error)?,
            FormField::File {
                file_name,
                content_type,
                bytes,
            } => {
                let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
                let bag = BlobPropertyBag::new();
                bag.set_type(content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &bag)
                    .map_err(js_error)?;
                form.append_with_blob_and_filename(name, &blob, file_name)
                    .map_err(js_error)?;
            }
        }
    }
    Ok(form)
}

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHttpClient;

#[async_trait(?Send)]
impl HttpClient for BrowserHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let headers = Headers::new().map_err(js_error)?;
        for (key, value) in &req.headers {
            headers.set(key, value).map_err(js_error)?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match &req.body {
            RequestBody::Empty => {}
            RequestBody::Json(body) => opts.set_body(&JsValue::from_str(body)),
            RequestBody::Multipart(fields) => opts.set_body(&form_data(fields)?.into()),
        }

        let request = Request::new_with_str_and_init(&req.url, &opts).map_err(js_error)?;

        let window =
            web_sys::window().ok_or_else(|| ApiError::network("window is not available"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;

        let response: Response = resp_value.dyn_into().map_err(js_error)?;
        let status = response.status();

        // 响应体读取失败按空处理，由上层根据状态码决定结果
        let body = match response.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .ok()
                .and_then(|text| text.as_string())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };

        Ok(HttpResponse { status, body })
    }
}
