//! 后端控制路由
//!
//! 路由树来自远程接口并已按权限过滤，这里不再做角色过滤，
//! 但需要把字符串形式的组件路径解析成已注册的视图。

use super::{BuiltTable, append_fallbacks};
use crate::config::RouterConfig;
use crate::error::RouteResult;
use crate::normalize::{flatten, renest};
use crate::view::{ResolveReport, ViewLookup, resolve_components};
use menuroute_shared::RouteNode;

/// 由后端返回的路由树构建两级路由表
///
/// 返回的树不含布局根路由 `/` 时，整棵树挂到 `layout` 下。
/// 解析组件 → 展开 → 两级化 → 追加兜底路由。组件解析的深度从远程树的第一层算起。
pub fn build_back_end_table(
    mut fetched: Vec<RouteNode>,
    layout: &RouteNode,
    fallbacks: &[RouteNode],
    views: &dyn ViewLookup,
    config: &RouterConfig,
) -> RouteResult<(BuiltTable, ResolveReport)> {
    let report = resolve_components(&mut fetched, views, config)
        .map_err(|e| e.in_op("builder.back_end"))?;

    let tree = if fetched.iter().any(RouteNode::is_root) {
        fetched
    } else {
        let mut shell = layout.clone();
        shell.children = fetched;
        vec![shell]
    };

    let menu = tree
        .iter()
        .filter(|r| r.is_root())
        .flat_map(|r| r.children.iter().cloned())
        .collect();

    let mut stage = renest(flatten(tree)).map_err(|e| e.in_op("builder.back_end"))?;
    append_fallbacks(&mut stage, fallbacks);

    let built = BuiltTable::from_stage(stage, menu);
    log_info!(
        "[Builder] back-end table: {} route(s), {} view(s) resolved, {} missing",
        built.route_list().len(),
        report.resolved,
        report.missing.len()
    );
    Ok((built, report))
}
