use crate::RouteNode;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize + DeserializeOwned {
    /// The response type returned by this request.
    type Response: Serialize + DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// 响应信封 (Response Envelope)
// =========================================================

/// 菜单接口返回的文档
///
/// 路由树位于 `data` 字段中，`code` 为可选的业务状态码。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default)]
    pub data: Vec<RouteNode>,
}

// =========================================================
// Request Definitions
// =========================================================

/// 获取后端动态路由菜单 (admin)
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminMenuRequest;

impl ApiRequest for AdminMenuRequest {
    type Response = MenuResponse;
    const PATH: &'static str = "/menu/adminMenu.json";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// 获取后端动态路由菜单 (test)
#[derive(Debug, Serialize, Deserialize)]
pub struct TestMenuRequest;

impl ApiRequest for TestMenuRequest {
    type Response = MenuResponse;
    const PATH: &'static str = "/menu/testMenu.json";
    const METHOD: HttpMethod = HttpMethod::Get;
}
