//! HTTP 请求封装模块
//!
//! 基于 `web_sys::fetch` 实现 `mentorai::request::HttpClient`，替代 `gloo-net`。

use mentorai::error::{ApiError, ApiResult};
use mentorai::request::{HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    fn build(req: &HttpRequest) -> ApiResult<Request> {
        let headers = Headers::new()
            .map_err(|e| ApiError::request(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| ApiError::request(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| ApiError::request(format!("{:?}", e)))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let request = Self::build(&req)?;

        let window =
            web_sys::window().ok_or_else(|| ApiError::network("无法获取 window 对象"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ApiError::network(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| ApiError::decode(format!("Response 类型转换失败: {:?}", e)))?;

        let status = response.status();
        let promise = response
            .text()
            .map_err(|e| ApiError::decode(format!("{:?}", e)))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| ApiError::decode(format!("{:?}", e)))?;

        Ok(HttpResponse {
            status,
            body: text.as_string().unwrap_or_default(),
        })
    }
}
