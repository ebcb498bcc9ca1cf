//! 内存路由表
//!
//! `Router` 接口的默认实现：保存已注册的路由树，并把 URL path 匹配到路由记录。
//! 支持静态段、`:param` 参数段以及 `:path(.*)*` 形式的兜底段。

use std::cell::RefCell;

use crate::adapter::{RegisteredRoute, Router};
use menuroute_shared::RouteNode;

#[derive(Debug, Default)]
pub struct MemoryRouter {
    routes: RefCell<Vec<RouteNode>>,
}

impl MemoryRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以静态路由（登录页等）初始化
    pub fn with_routes(routes: Vec<RouteNode>) -> Self {
        Self {
            routes: RefCell::new(routes),
        }
    }

    pub fn len(&self) -> usize {
        self.get_routes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.borrow().is_empty()
    }
}

impl Router for MemoryRouter {
    fn add_route(&self, route: RouteNode) {
        // 新路由树中出现的名称（含子路由）都会替换已注册的同名记录
        let mut names = Vec::new();
        collect_names(&route, &mut names);
        let mut routes = self.routes.borrow_mut();
        for name in &names {
            remove_named(&mut routes, name);
        }
        routes.push(route);
    }

    fn remove_route(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        remove_named(&mut self.routes.borrow_mut(), name)
    }

    fn has_route(&self, name: &str) -> bool {
        !name.is_empty() && find_named(&self.routes.borrow(), name)
    }

    fn get_routes(&self) -> Vec<RegisteredRoute> {
        let mut out = Vec::new();
        collect(&self.routes.borrow(), "", &mut out);
        out
    }

    fn resolve(&self, path: &str) -> Option<RouteNode> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let routes = self.routes.borrow();
        let mut best: Option<(u32, &RouteNode)> = None;
        best_match(&routes, "", path, &mut best);
        best.map(|(_, node)| {
            let mut record = node.clone();
            record.children = Vec::new();
            record
        })
    }
}

// =========================================================
// 内部工具函数
// =========================================================

fn remove_named(routes: &mut Vec<RouteNode>, name: &str) -> bool {
    let before = routes.len();
    routes.retain(|r| r.name != name);
    let mut removed = routes.len() != before;
    for route in routes.iter_mut() {
        removed |= remove_named(&mut route.children, name);
    }
    removed
}

fn collect_names(route: &RouteNode, out: &mut Vec<String>) {
    if route.is_named() {
        out.push(route.name.clone());
    }
    for child in &route.children {
        collect_names(child, out);
    }
}

fn find_named(routes: &[RouteNode], name: &str) -> bool {
    routes
        .iter()
        .any(|r| r.name == name || find_named(&r.children, name))
}

fn collect(routes: &[RouteNode], parent: &str, out: &mut Vec<RegisteredRoute>) {
    for route in routes {
        let full = join_path(parent, &route.path);
        out.push(RegisteredRoute {
            name: route.is_named().then(|| route.name.clone()),
            path: full.clone(),
        });
        collect(&route.children, &full, out);
    }
}

fn best_match<'a>(
    routes: &'a [RouteNode],
    parent: &str,
    path: &str,
    best: &mut Option<(u32, &'a RouteNode)>,
) {
    for route in routes {
        let full = join_path(parent, &route.path);
        if let Some(score) = match_score(&full, path) {
            if best.is_none_or(|(s, _)| score > s) {
                *best = Some((score, route));
            }
        }
        best_match(&route.children, &full, path, best);
    }
}

/// 子路由 path 以 `/` 开头时视为绝对路径
pub fn join_path(parent: &str, path: &str) -> String {
    if path.starts_with('/') || parent.is_empty() {
        return path.to_string();
    }
    format!("{}/{}", parent.trim_end_matches('/'), path)
}

/// 匹配得分：静态段 3 分，参数段 2 分，兜底段 0 分；不匹配返回 None
pub fn match_score(pattern: &str, path: &str) -> Option<u32> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let mut score = 0;
    // 根路由与空路径也算一次精确匹配
    let mut matched_any = false;

    for part in pattern.split('/').filter(|s| !s.is_empty()) {
        if part.starts_with(':') && part.contains("(.*)") {
            return Some(score);
        }
        let segment = segments.next()?;
        if part.starts_with(':') {
            score += 2;
        } else if part == segment {
            score += 3;
        } else {
            return None;
        }
        matched_any = true;
    }

    if segments.next().is_some() {
        return None;
    }
    Some(if matched_any { score } else { 1 })
}
