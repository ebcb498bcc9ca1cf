//! 路由表构建
//!
//! - `front_end`: 路由由前端声明，按当前角色过滤
//! - `back_end`: 路由由后端返回，已在服务端按权限过滤，需要解析组件引用
//!
//! 两种方式最终都产出同样的两级路由表，并在布局根路由下追加 401/404 兜底路由。

pub mod back_end;
pub mod front_end;

use crate::normalize::TwoStage;
use menuroute_shared::RouteNode;

/// 一次初始化的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// 会话中没有 token，未做任何修改，调用方不应继续注册路由
    NoSession,
    /// 已登录但后端没有授予任何路由
    Empty,
    /// 路由列表已存在（并发初始化时后到的一方）
    AlreadyLoaded,
    /// 已注册路由表，`routes` 为布局根路由下的路由数
    Committed { routes: usize },
}

impl InitOutcome {
    /// 是否可以继续后续导航
    pub fn is_proceeding(&self) -> bool {
        !matches!(self, InitOutcome::NoSession)
    }
}

/// 构建完成的路由表及派生列表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuiltTable {
    /// 提交给路由器的两级路由表
    pub table: Vec<RouteNode>,
    pub tags_view: Vec<RouteNode>,
    pub keep_alive_names: Vec<String>,
    /// 保留嵌套结构的菜单
    pub menu: Vec<RouteNode>,
}

impl BuiltTable {
    fn from_stage(stage: TwoStage, menu: Vec<RouteNode>) -> Self {
        let tags_view = tags_view(stage.children());
        Self {
            table: stage.table,
            tags_view,
            keep_alive_names: stage.keep_alive_names,
            menu,
        }
    }

    /// 布局根路由下的一级路由列表
    pub fn route_list(&self) -> &[RouteNode] {
        self.table
            .first()
            .map(|root| root.children.as_slice())
            .unwrap_or(&[])
    }
}

/// 在布局根路由的 children 末尾追加兜底路由
///
/// 已存在同名路由时跳过，多次构建也只会出现一次。
pub fn append_fallbacks(stage: &mut TwoStage, fallbacks: &[RouteNode]) {
    let Some(root) = stage.root_mut() else {
        return;
    };
    for fallback in fallbacks {
        if root.children.iter().any(|c| c.name == fallback.name) {
            continue;
        }
        root.children.push(fallback.clone());
    }
}

/// 标签页列表：去掉 `is_hide` 的路由
pub fn tags_view(routes: &[RouteNode]) -> Vec<RouteNode> {
    routes
        .iter()
        .filter(|r| !r.meta.is_hide)
        .cloned()
        .collect()
}
