//! 角色权限过滤

use menuroute_shared::RouteNode;

/// 路由是否允许该角色访问
///
/// 未声明 roles 时按 `[default_role]` 处理。
pub fn has_role(route: &RouteNode, role: &str, default_role: &str) -> bool {
    match &route.meta.roles {
        Some(roles) => roles.iter().any(|r| r == role),
        None => role == default_role,
    }
}

/// 按角色过滤一维路由数组
///
/// 未声明 roles 的路由先补上 `[default_role]`，再判断当前角色是否在其中。
/// 作用在规整后的一级子路由上，每个节点独立判断。
pub fn filter_by_role(routes: Vec<RouteNode>, role: &str, default_role: &str) -> Vec<RouteNode> {
    routes
        .into_iter()
        .map(|mut route| {
            route
                .meta
                .roles
                .get_or_insert_with(|| vec![default_role.to_string()]);
            route
        })
        .filter(|route| has_role(route, role, default_role))
        .collect()
}

/// 按角色递归过滤嵌套路由树（侧边栏菜单使用）
///
/// 父路由无权限时，整棵子树一起丢弃。
pub fn filter_tree_by_role(tree: Vec<RouteNode>, role: &str, default_role: &str) -> Vec<RouteNode> {
    filter_by_role(tree, role, default_role)
        .into_iter()
        .map(|mut route| {
            let children = std::mem::take(&mut route.children);
            route.children = filter_tree_by_role(children, role, default_role);
            route
        })
        .collect()
}
