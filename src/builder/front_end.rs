//! 前端控制路由
//!
//! 路由表随应用一起声明，登录用户的角色决定哪些路由可见。

use super::{BuiltTable, append_fallbacks};
use crate::config::RouterConfig;
use crate::error::{RouteError, RouteResult};
use crate::normalize::{flatten, renest};
use crate::permission::{filter_by_role, filter_tree_by_role};
use menuroute_shared::RouteNode;

/// 由前端声明的路由树构建两级路由表
///
/// 展开 → 两级化 → 按角色过滤根路由下的子路由 → 追加兜底路由。
/// 兜底路由在过滤之后追加，任何角色都能访问。
pub fn build_front_end_table(
    declared: &[RouteNode],
    role: &str,
    fallbacks: &[RouteNode],
    config: &RouterConfig,
) -> RouteResult<BuiltTable> {
    let mut stage =
        renest(flatten(declared.to_vec())).map_err(|e| e.in_op_with("builder.front_end", role))?;

    let Some(root) = stage.root_mut() else {
        return Err(RouteError::invalid_input("no routes declared")
            .in_op_with("builder.front_end", role));
    };
    let children = std::mem::take(&mut root.children);
    root.children = filter_by_role(children, role, &config.default_role);

    // 只缓存当前角色可以访问的路由
    let allowed: Vec<String> = root.children.iter().map(|c| c.name.clone()).collect();
    stage.keep_alive_names.retain(|name| allowed.contains(name));

    append_fallbacks(&mut stage, fallbacks);

    let menu = declared
        .iter()
        .filter(|r| r.is_root())
        .flat_map(|r| r.children.iter().cloned())
        .collect();
    let menu = filter_tree_by_role(menu, role, &config.default_role);

    let built = BuiltTable::from_stage(stage, menu);
    log_info!(
        "[Builder] front-end table for role `{}`: {} route(s), {} tag(s), {} cached",
        role,
        built.route_list().len(),
        built.tags_view.len(),
        built.keep_alive_names.len()
    );
    Ok(built)
}
