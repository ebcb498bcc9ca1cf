//! 路由共享状态
//!
//! 显式的状态容器，替代全局 store：只有表构建流程（以及登出重置）会写入，
//! UI 层通过快照只读访问。

use std::cell::{Cell, RefCell};

use crate::config::ControlMode;
use menuroute_shared::RouteNode;

/// 某一时刻的状态快照，供 UI 层整体读取
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSnapshot {
    pub mode: ControlMode,
    /// 当前生效的路由列表（布局根路由的一级子路由）
    pub route_list: Vec<RouteNode>,
    /// 标签页可展示的路由（已去掉隐藏路由）
    pub tags_view_routes: Vec<RouteNode>,
    /// keep-alive 缓存的组件 name
    pub keep_alive_names: Vec<String>,
    /// 侧边栏菜单（保留嵌套结构）
    pub menu_list: Vec<RouteNode>,
    /// 刷新前的标签页，用于恢复
    pub request_old_routes: Vec<RouteNode>,
    /// 已登录但后端没有授予任何路由
    pub no_grant: bool,
}

#[derive(Debug, Default)]
pub struct RouteState {
    mode: Cell<ControlMode>,
    route_list: RefCell<Vec<RouteNode>>,
    tags_view_routes: RefCell<Vec<RouteNode>>,
    keep_alive_names: RefCell<Vec<String>>,
    menu_list: RefCell<Vec<RouteNode>>,
    request_old_routes: RefCell<Vec<RouteNode>>,
    no_grant: Cell<bool>,
    /// 每次写入后递增，UI 层据此判断是否需要重新读取
    revision: Cell<u64>,
}

impl RouteState {
    pub fn new(mode: ControlMode) -> Self {
        let state = Self::default();
        state.mode.set(mode);
        state
    }

    // --- 只读访问 ---

    pub fn mode(&self) -> ControlMode {
        self.mode.get()
    }

    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    pub fn route_list(&self) -> Vec<RouteNode> {
        self.route_list.borrow().clone()
    }

    pub fn route_list_is_empty(&self) -> bool {
        self.route_list.borrow().is_empty()
    }

    pub fn tags_view_routes(&self) -> Vec<RouteNode> {
        self.tags_view_routes.borrow().clone()
    }

    pub fn keep_alive_names(&self) -> Vec<String> {
        self.keep_alive_names.borrow().clone()
    }

    pub fn menu_list(&self) -> Vec<RouteNode> {
        self.menu_list.borrow().clone()
    }

    pub fn request_old_routes(&self) -> Vec<RouteNode> {
        self.request_old_routes.borrow().clone()
    }

    pub fn no_grant(&self) -> bool {
        self.no_grant.get()
    }

    pub fn snapshot(&self) -> RouteSnapshot {
        RouteSnapshot {
            mode: self.mode(),
            route_list: self.route_list(),
            tags_view_routes: self.tags_view_routes(),
            keep_alive_names: self.keep_alive_names(),
            menu_list: self.menu_list(),
            request_old_routes: self.request_old_routes(),
            no_grant: self.no_grant(),
        }
    }

    // --- 写入（仅限本 crate 的构建流程） ---

    pub(crate) fn set_mode(&self, mode: ControlMode) {
        self.mode.set(mode);
        self.bump();
    }

    pub(crate) fn set_route_list(&self, routes: Vec<RouteNode>) {
        *self.route_list.borrow_mut() = routes;
        self.bump();
    }

    pub(crate) fn set_tags_view_routes(&self, routes: Vec<RouteNode>) {
        *self.tags_view_routes.borrow_mut() = routes;
        self.bump();
    }

    pub(crate) fn set_keep_alive_names(&self, names: Vec<String>) {
        *self.keep_alive_names.borrow_mut() = names;
        self.bump();
    }

    pub(crate) fn set_menu_list(&self, menu: Vec<RouteNode>) {
        *self.menu_list.borrow_mut() = menu;
        self.bump();
    }

    pub(crate) fn set_request_old_routes(&self, routes: Vec<RouteNode>) {
        *self.request_old_routes.borrow_mut() = routes;
        self.bump();
    }

    pub(crate) fn set_no_grant(&self, no_grant: bool) {
        self.no_grant.set(no_grant);
        self.bump();
    }

    /// 清空所有路由相关的列表（登出时使用），控制方式保持不变
    pub(crate) fn clear(&self) {
        self.route_list.borrow_mut().clear();
        self.tags_view_routes.borrow_mut().clear();
        self.keep_alive_names.borrow_mut().clear();
        self.menu_list.borrow_mut().clear();
        self.request_old_routes.borrow_mut().clear();
        self.no_grant.set(false);
        self.bump();
    }

    fn bump(&self) {
        self.revision.set(self.revision.get().wrapping_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_bump_revision_and_clear_keeps_mode() {
        let state = RouteState::new(ControlMode::BackEnd);
        assert_eq!(state.revision(), 0);
        assert!(state.route_list_is_empty());

        state.set_route_list(vec![RouteNode::new("/home", "home")]);
        state.set_keep_alive_names(vec!["home".into()]);
        state.set_no_grant(true);
        assert_eq!(state.revision(), 3);
        assert_eq!(state.snapshot().route_list.len(), 1);

        state.clear();
        let snapshot = state.snapshot();
        assert!(snapshot.route_list.is_empty());
        assert!(snapshot.keep_alive_names.is_empty());
        assert!(!snapshot.no_grant);
        assert_eq!(snapshot.mode, ControlMode::BackEnd);
    }
}
