//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 提供简洁的 HTTP 客户端接口，
//! 并在其上实现从菜单接口拉取路由的 `RouteSource`。

use async_trait::async_trait;
use menuroute::{RouteError, RouteResult, RouteSource, SessionStore};
use menuroute_shared::protocol::{ApiRequest, HttpMethod, MenuResponse, TestMenuRequest};
use menuroute_shared::{RouteNode, SESSION_USER_INFO_KEY, UserInfo};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use super::SessionStorage;

fn method_str(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "GET",
        HttpMethod::Post => "POST",
    }
}

/// HTTP 错误类型
#[derive(Debug)]
pub enum HttpError {
    /// 请求构建失败
    RequestBuildFailed(String),
    /// 网络请求失败
    NetworkError(String),
    /// 响应解析失败
    ResponseParseFailed(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::RequestBuildFailed(msg) => write!(f, "请求构建失败: {}", msg),
            HttpError::NetworkError(msg) => write!(f, "网络错误: {}", msg),
            HttpError::ResponseParseFailed(msg) => write!(f, "响应解析失败: {}", msg),
        }
    }
}

impl From<HttpError> for RouteError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::ResponseParseFailed(msg) => RouteError::serialization(msg),
            other => RouteError::upstream(other.to_string()),
        }
    }
}

/// HTTP 响应封装
pub struct HttpResponse {
    inner: Response,
}

impl HttpResponse {
    /// 获取 HTTP 状态码
    pub fn status(&self) -> u16 {
        self.inner.status()
    }

    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        self.inner.ok()
    }

    /// 获取响应体文本
    pub async fn text(self) -> Result<String, HttpError> {
        let promise = self
            .inner
            .text()
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

        text.as_string()
            .ok_or_else(|| HttpError::ResponseParseFailed("无法转换为字符串".to_string()))
    }
}

/// HTTP 请求构建器
pub struct HttpRequestBuilder {
    url: String,
    method: HttpMethod,
    headers: Vec<(String, String)>,
}

impl HttpRequestBuilder {
    fn new(url: String, method: HttpMethod) -> Self {
        Self {
            url,
            method,
            headers: Vec::new(),
        }
    }

    /// 添加请求头
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 发送请求
    pub async fn send(self) -> Result<HttpResponse, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &self.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuildFailed(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(method_str(self.method));
        opts.set_headers(&headers.into());

        let request = Request::new_with_str_and_init(&self.url, &opts)
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::NetworkError("无法获取 window 对象".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

        let response: Response = resp_value.dyn_into().map_err(|e| {
            HttpError::ResponseParseFailed(format!("Response 类型转换失败: {:?}", e))
        })?;

        Ok(HttpResponse { inner: response })
    }
}

/// 轻量级 HTTP 客户端
pub struct HttpClient;

impl HttpClient {
    /// 创建 GET 请求
    pub fn get(url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url.to_string(), HttpMethod::Get)
    }
}

// =========================================================
// 菜单接口
// =========================================================

/// 从菜单接口拉取后端控制的路由
///
/// `admin` 角色请求 `menu_url`，其余角色请求测试菜单。
pub struct HttpRouteSource {
    menu_url: String,
    token_key: String,
    session: SessionStorage,
}

impl HttpRouteSource {
    pub fn new(menu_url: impl Into<String>, token_key: impl Into<String>) -> Self {
        Self {
            menu_url: menu_url.into(),
            token_key: token_key.into(),
            session: SessionStorage,
        }
    }

    fn endpoint(&self) -> &str {
        let role = self
            .session
            .get(SESSION_USER_INFO_KEY)
            .and_then(|raw| serde_json_wasm::from_str::<UserInfo>(&raw).ok())
            .and_then(|info| info.role().map(str::to_string));
        match role.as_deref() {
            Some("admin") => self.menu_url.as_str(),
            _ => TestMenuRequest::PATH,
        }
    }
}

#[async_trait(?Send)]
impl RouteSource for HttpRouteSource {
    async fn fetch_routes(&self) -> RouteResult<Vec<RouteNode>> {
        let url = self.endpoint().to_string();
        let mut request = HttpClient::get(&url);
        if let Some(token) = self.session.get(&self.token_key) {
            request = request.header("Authorization", &token);
        }

        let res = request
            .send()
            .await
            .map_err(|e| RouteError::from(e).in_op_with("http.menu", url.clone()))?;
        if !res.ok() {
            return Err(
                RouteError::upstream(format!("菜单接口返回 {}", res.status()))
                    .in_op_with("http.menu", url),
            );
        }

        let body = res
            .text()
            .await
            .map_err(|e| RouteError::from(e).in_op_with("http.menu", url.clone()))?;
        let menu: MenuResponse = serde_json_wasm::from_str(&body).map_err(|e| {
            RouteError::serialization(e.to_string()).in_op_with("http.menu", url.clone())
        })?;
        Ok(menu.data)
    }
}
