use crate::adapter::EnvAdapter;
use menuroute_shared::protocol::{AdminMenuRequest, ApiRequest};
use menuroute_shared::{DEFAULT_ROLE, SESSION_TOKEN_KEY};

// =========================================================
// 动态运行时配置 (Runtime Configuration)
// =========================================================

/// 这些是默认值，如果环境中没有定义对应变量，则使用这些值
const DEFAULT_APP_TITLE: &str = "vue-next-admin";
const DEFAULT_VIEWS_ROOT: &str = "/views/";
const DEFAULT_MAX_RESOLVE_DEPTH: usize = 3;

/// 路由权限的控制方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// 路由表由前端声明，按角色在本地过滤
    #[default]
    FrontEnd,
    /// 路由表由后端返回，已在服务端按权限过滤
    BackEnd,
}

impl ControlMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "frontend" | "front" | "false" => Some(ControlMode::FrontEnd),
            "backend" | "back" | "true" => Some(ControlMode::BackEnd),
            _ => None,
        }
    }
}

/// 组件解析深度超限时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthOverflow {
    /// 打印警告，超出部分保留原始组件路径
    #[default]
    Warn,
    /// 直接返回错误
    Error,
}

/// 路由层配置
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub mode: ControlMode,
    /// 页面标题后缀
    pub app_title: String,
    /// 会话中 token 的 key
    pub token_key: String,
    /// 后端路由菜单地址
    pub menu_url: String,
    /// 组件路径中视图根目录的标记
    pub views_root: String,
    /// 组件递归解析的最大层数（路由 → 子路由 → 孙路由 为 3）
    pub max_resolve_depth: usize,
    pub depth_overflow: DepthOverflow,
    /// 未声明 roles 时使用的角色
    pub default_role: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            mode: ControlMode::default(),
            app_title: DEFAULT_APP_TITLE.to_string(),
            token_key: SESSION_TOKEN_KEY.to_string(),
            menu_url: AdminMenuRequest::PATH.to_string(),
            views_root: DEFAULT_VIEWS_ROOT.to_string(),
            max_resolve_depth: DEFAULT_MAX_RESOLVE_DEPTH,
            depth_overflow: DepthOverflow::default(),
            default_role: DEFAULT_ROLE.to_string(),
        }
    }
}

impl RouterConfig {
    /// 从环境变量读取配置，读不到或无法解析的项使用默认值
    pub fn from_env(env: &impl EnvAdapter) -> Self {
        let defaults = Self::default();
        Self {
            mode: env
                .var("ROUTE_MODE")
                .and_then(|v| ControlMode::parse(&v))
                .unwrap_or(defaults.mode),
            app_title: env.var("APP_TITLE").unwrap_or(defaults.app_title),
            token_key: env.var("TOKEN_KEY").unwrap_or(defaults.token_key),
            menu_url: env.var("MENU_URL").unwrap_or(defaults.menu_url),
            views_root: env.var("VIEWS_ROOT").unwrap_or(defaults.views_root),
            max_resolve_depth: env
                .var("MAX_RESOLVE_DEPTH")
                .and_then(|v| v.parse().ok())
                .filter(|d: &usize| *d > 0)
                .unwrap_or(defaults.max_resolve_depth),
            depth_overflow: match env.var("DEPTH_OVERFLOW").as_deref() {
                Some("error") => DepthOverflow::Error,
                Some("warn") => DepthOverflow::Warn,
                _ => defaults.depth_overflow,
            },
            default_role: env.var("DEFAULT_ROLE").unwrap_or(defaults.default_role),
        }
    }

    pub fn is_back_end(&self) -> bool {
        self.mode == ControlMode::BackEnd
    }
}
