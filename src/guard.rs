//! 导航守卫
//!
//! 每次导航前执行：未登录跳转登录页，首次导航时按需初始化后端路由，
//! 无标题且未注册的路由视为不存在。

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::adapter::{RouteSource, Router, SessionStore};
use crate::builder::InitOutcome;
use crate::config::ControlMode;
use crate::context::RouteContext;
use crate::error::{RouteError, RouteResult};
use menuroute_shared::{HOME_PATH, LOGIN_PATH, NO_POWER_PATH, NOT_FOUND_PATH};

/// 查询参数中需要转义的字符：除字母数字与 `-_.~/` 之外全部转义
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_COMPONENT).to_string()
}

fn decode_component(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// 导航目标
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationTarget {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

impl NavigationTarget {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: BTreeMap::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// 解析 `path?a=1&b=2` 形式的地址，`#` 之后的部分忽略
    ///
    /// 参数名与参数值按百分号编码解码。
    pub fn parse(url: &str) -> Self {
        let url = url.split('#').next().unwrap_or_default();
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (decode_component(k), decode_component(v)),
                None => (decode_component(pair), String::new()),
            })
            .collect();
        Self {
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            query,
        }
    }

    pub fn to_url(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect();
        format!("{}?{}", self.path, query.join("&"))
    }
}

/// 守卫的决定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// 放行，附带应设置的页面标题
    Proceed { title: String },
    /// 跳转到另一个地址
    Redirect(String),
    /// 路由表刚刚注册完成，以 replace 方式重新导航到同一地址
    Replay(NavigationTarget),
}

/// 页面标题：`{路由标题} - {应用标题}`，路由没有标题时只用应用标题
pub fn document_title(route_title: Option<&str>, app_title: &str) -> String {
    match route_title {
        Some(title) if !title.is_empty() => format!("{} - {}", title, app_title),
        _ => app_title.to_string(),
    }
}

/// 跳转登录页的地址，携带原始路径与参数（JSON），用于登录后跳回
pub fn login_redirect(to: &NavigationTarget) -> RouteResult<String> {
    let params = serde_json::to_string(&to.query)?;
    Ok(NavigationTarget::new(LOGIN_PATH)
        .with_query("redirect", to.path.clone())
        .with_query("params", params)
        .to_url())
}

/// 登录后跳回的地址
///
/// 从登录页地址的 `redirect` 与 `params` 还原守卫拦截前的目标；
/// 没有 `redirect` 或指向登录页本身时回到首页。
pub fn redirect_after_login(login_url: &NavigationTarget) -> RouteResult<String> {
    let Some(path) = login_url
        .query
        .get("redirect")
        .filter(|p| !p.is_empty() && p.as_str() != LOGIN_PATH)
    else {
        return Ok(HOME_PATH.to_string());
    };

    let mut target = NavigationTarget::new(path.clone());
    if let Some(params) = login_url.query.get("params") {
        target.query = serde_json::from_str(params).map_err(|e| {
            RouteError::from(e).in_op_with("guard.redirect_after_login", params.clone())
        })?;
    }
    Ok(target.to_url())
}

impl<R, S, Src> RouteContext<R, S, Src>
where
    R: Router,
    S: SessionStore,
    Src: RouteSource,
{
    /// 路由加载前
    pub async fn before_each(&self, to: &NavigationTarget) -> RouteResult<NavigationDecision> {
        let has_token = self.has_token();
        let matched = self.registry.router().resolve(&to.path);
        let title = document_title(
            matched.as_ref().and_then(|r| r.meta.title.as_deref()),
            &self.config.app_title,
        );

        if to.path == LOGIN_PATH && !has_token {
            return Ok(NavigationDecision::Proceed { title });
        }
        if !has_token {
            self.session.clear();
            let target = login_redirect(to)?;
            log_info!("[Guard] no session, redirecting to {}", target);
            return Ok(NavigationDecision::Redirect(target));
        }
        if to.path == LOGIN_PATH {
            return Ok(NavigationDecision::Redirect(HOME_PATH.to_string()));
        }

        // 动态路由（后端返回）尚未加载
        if self.state.mode() == ControlMode::BackEnd
            && self.state.route_list_is_empty()
            && !self.state.no_grant()
        {
            return Ok(match self.init_back_end_control_routes().await? {
                InitOutcome::Empty => NavigationDecision::Redirect(NO_POWER_PATH.to_string()),
                _ => NavigationDecision::Replay(to.clone()),
            });
        }

        let has_title = matched.as_ref().is_some_and(|r| r.meta.title.is_some());
        let has_route = matched
            .as_ref()
            .is_some_and(|r| r.is_named() && self.registry.router().has_route(&r.name));
        if !has_title && !has_route {
            log_info!("[Guard] `{}` is not declared, redirecting to not-found", to.path);
            return Ok(NavigationDecision::Redirect(NOT_FOUND_PATH.to_string()));
        }

        Ok(NavigationDecision::Proceed { title })
    }
}
