use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 布局根路由的 path，规整后它是唯一的顶级路由
pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/home";
pub const NOT_FOUND_PATH: &str = "/error/404";
pub const NO_POWER_PATH: &str = "/401";
/// 匹配所有剩余路径的兜底路由
pub const CATCH_ALL_PATH: &str = "/:path(.*)*";

pub const NOT_FOUND_NAME: &str = "notFound";
pub const NO_POWER_NAME: &str = "noPower";

pub const SESSION_TOKEN_KEY: &str = "token";
pub const SESSION_USER_INFO_KEY: &str = "userInfo";

/// 未声明 roles 时的默认角色
pub const DEFAULT_ROLE: &str = "admin";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 路由对应的视图组件引用
///
/// - `Path`: 后端返回的原始组件路径，例如 `/src/views/system/menu/index.vue`
/// - `View`: 已在视图注册表中解析过的逻辑 key，例如 `system/menu/index`
///
/// 两者序列化时都是普通字符串；反序列化总是得到 `Path`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentRef {
    Path(String),
    View(String),
}

impl ComponentRef {
    pub fn view(key: impl Into<String>) -> Self {
        ComponentRef::View(key.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            ComponentRef::Path(s) | ComponentRef::View(s) => s,
        }
    }
}

impl From<String> for ComponentRef {
    fn from(s: String) -> Self {
        ComponentRef::Path(s)
    }
}

impl From<ComponentRef> for String {
    fn from(c: ComponentRef) -> Self {
        match c {
            ComponentRef::Path(s) | ComponentRef::View(s) => s,
        }
    }
}

/// 路由元信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// 允许访问的角色，缺省时按 `["admin"]` 处理
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    pub is_keep_alive: bool,
    pub is_hide: bool,
    /// path 中含有 `/:` 参数段时为 true（规整阶段写入）
    pub is_dynamic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dynamic_path: Option<String>,

    // 以下字段仅供菜单/标签页展示，路由逻辑不读取
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub is_affix: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_link: Option<String>,
    pub is_iframe: bool,
}

impl RouteMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    pub fn keep_alive(mut self) -> Self {
        self.is_keep_alive = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_hide = true;
        self
    }

    pub fn affix(mut self) -> Self {
        self.is_affix = true;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// 路由节点
///
/// `name` 在整张路由表中唯一，作为删除路由与 keep-alive 缓存的 key。
/// 空字符串表示匿名路由。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteNode {
    pub path: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default)]
    pub meta: RouteMeta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_component(mut self, component: ComponentRef) -> Self {
        self.component = Some(component);
        self
    }

    pub fn with_redirect(mut self, redirect: impl Into<String>) -> Self {
        self.redirect = Some(redirect.into());
        self
    }

    pub fn with_meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_children(mut self, children: Vec<RouteNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.path == ROOT_PATH
    }

    /// path 是否包含参数段，例如 `/user/:id`
    pub fn has_param_segment(&self) -> bool {
        self.path.contains("/:")
    }

    /// 树中节点总数（含自身）
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(RouteNode::count).sum::<usize>()
    }
}

/// 保存在会话中的用户信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserInfo {
    /// 当前角色：取第一个角色
    pub fn role(&self) -> Option<&str> {
        self.roles.first().map(String::as_str)
    }
}

/// 401/404 兜底路由
///
/// 追加在布局根路由的 children 中，保证错误页在布局内部渲染而不是全屏显示。
pub fn not_found_and_no_power() -> Vec<RouteNode> {
    vec![
        RouteNode::new(CATCH_ALL_PATH, NOT_FOUND_NAME)
            .with_component(ComponentRef::view("error/404"))
            .with_meta(RouteMeta::titled("message.staticRoutes.notFound").hidden()),
        RouteNode::new(NO_POWER_PATH, NO_POWER_NAME)
            .with_component(ComponentRef::view("error/401"))
            .with_meta(RouteMeta::titled("message.staticRoutes.noPower").hidden()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_node_from_menu_json() {
        let json = r#"{
            "path": "/system",
            "name": "system",
            "component": "layout/routerView/parent",
            "redirect": "/system/menu",
            "meta": { "title": "message.router.system", "roles": ["admin"], "isKeepAlive": true, "isHide": false, "icon": "iconfont icon-xitongshezhi" },
            "children": [
                { "path": "/system/menu", "name": "systemMenu", "component": "/src/views/system/menu/index.vue", "meta": { "title": "message.router.systemMenu" } }
            ]
        }"#;

        let node: RouteNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.name, "system");
        assert_eq!(
            node.component,
            Some(ComponentRef::Path("layout/routerView/parent".into()))
        );
        assert!(node.meta.is_keep_alive);
        assert_eq!(node.meta.roles.as_deref(), Some(&["admin".to_string()][..]));
        assert_eq!(node.children.len(), 1);
        assert!(node.children[0].meta.roles.is_none());
        assert!(node.children[0].children.is_empty());
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = RouteMeta {
            is_dynamic: true,
            is_dynamic_path: Some("/user/:id".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["isDynamic"], true);
        assert_eq!(value["isDynamicPath"], "/user/:id");
        assert!(value.get("roles").is_none());
    }

    #[test]
    fn test_resolved_component_serializes_as_key() {
        let node = RouteNode::new("/home", "home").with_component(ComponentRef::view("home/index"));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["component"], "home/index");
    }

    #[test]
    fn test_user_info_role() {
        let info: UserInfo =
            serde_json::from_str(r#"{"userName":"test","roles":["common","admin"]}"#).unwrap();
        assert_eq!(info.role(), Some("common"));
        assert_eq!(UserInfo::default().role(), None);
    }

    #[test]
    fn test_fallback_routes_are_hidden_and_named() {
        let fallbacks = not_found_and_no_power();
        assert_eq!(fallbacks.len(), 2);
        assert!(fallbacks.iter().all(|r| r.meta.is_hide && r.is_named()));
    }
}
