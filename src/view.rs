//! 视图解析
//!
//! 后端返回的 `component` 是字符串路径。这里把它换算成逻辑视图 key，
//! 并在编译期/加载期注册好的视图表中查找，而不是在运行时按路径动态导入模块。

use std::collections::HashMap;

use crate::config::{DepthOverflow, RouterConfig};
use crate::error::{RouteError, RouteResult};
use menuroute_shared::{ComponentRef, RouteNode};

// =========================================================
// 视图注册表
// =========================================================

/// 按 key 查询视图是否存在
pub trait ViewLookup {
    fn contains_view(&self, key: &str) -> bool;
}

impl<T: ViewLookup + ?Sized> ViewLookup for std::rc::Rc<T> {
    fn contains_view(&self, key: &str) -> bool {
        (**self).contains_view(key)
    }
}

/// 逻辑视图 key → 组件工厂
pub struct ViewRegistry<F> {
    views: HashMap<String, F>,
}

impl<F> Default for ViewRegistry<F> {
    fn default() -> Self {
        Self {
            views: HashMap::new(),
        }
    }
}

impl<F> ViewRegistry<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, key: impl Into<String>, factory: F) -> Self {
        self.views.insert(key.into(), factory);
        self
    }

    pub fn get(&self, key: &str) -> Option<&F> {
        self.views.get(key)
    }
}

impl<F> ViewLookup for ViewRegistry<F> {
    fn contains_view(&self, key: &str) -> bool {
        self.views.contains_key(key)
    }
}

/// 组件路径换算成视图 key
///
/// 取 `views_root` 之后的部分并去掉扩展名：
/// `/src/views/system/menu/index.vue` → `system/menu/index`。
/// 不含 `views_root` 的路径只去掉开头的 `/`。
pub fn view_key(component: &str, views_root: &str) -> String {
    let relative = match component.split_once(views_root) {
        Some((_, rest)) => rest,
        None => component.trim_start_matches('/'),
    };
    match relative.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains('/') && !stem.is_empty() => stem.to_string(),
        _ => relative.to_string(),
    }
}

// =========================================================
// 递归解析
// =========================================================

/// 一次解析的结果统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    pub resolved: usize,
    /// 注册表中不存在的视图 key（仍然写入节点，渲染时再处理）
    pub missing: Vec<String>,
    /// 超出深度限制、没有解析的路由 name
    pub unresolved: Vec<String>,
}

/// 递归解析路由树中的组件引用
///
/// 第一层路由的深度为 1，深度超过 `max_resolve_depth` 的路由按
/// `depth_overflow` 处理：`Warn` 时保留原始路径，`Error` 时返回错误。
pub fn resolve_components(
    tree: &mut [RouteNode],
    views: &dyn ViewLookup,
    config: &RouterConfig,
) -> RouteResult<ResolveReport> {
    let mut report = ResolveReport::default();
    resolve_level(tree, 1, views, config, &mut report)?;

    if !report.unresolved.is_empty() {
        log_warn!(
            "[View] {} route(s) nested deeper than {} levels left unresolved: {}",
            report.unresolved.len(),
            config.max_resolve_depth,
            report.unresolved.join(", ")
        );
    }
    Ok(report)
}

fn resolve_level(
    nodes: &mut [RouteNode],
    depth: usize,
    views: &dyn ViewLookup,
    config: &RouterConfig,
    report: &mut ResolveReport,
) -> RouteResult<()> {
    for node in nodes {
        if depth > config.max_resolve_depth {
            if config.depth_overflow == DepthOverflow::Error {
                return Err(RouteError::invalid_input(format!(
                    "route `{}` is nested {} levels deep, limit is {}",
                    node.name, depth, config.max_resolve_depth
                ))
                .in_op_with("view.resolve", node.path.clone()));
            }
            collect_unresolved(node, report);
            continue;
        }

        if let Some(ComponentRef::Path(path)) = &node.component {
            let key = view_key(path, &config.views_root);
            if !views.contains_view(&key) {
                log_warn!("[View] `{}` has no registered view `{}`", node.name, key);
                report.missing.push(key.clone());
            }
            node.component = Some(ComponentRef::View(key));
            report.resolved += 1;
        }

        resolve_level(&mut node.children, depth + 1, views, config, report)?;
    }
    Ok(())
}

fn collect_unresolved(node: &RouteNode, report: &mut ResolveReport) {
    if matches!(node.component, Some(ComponentRef::Path(_))) {
        report.unresolved.push(node.name.clone());
    }
    for child in &node.children {
        collect_unresolved(child, report);
    }
}
