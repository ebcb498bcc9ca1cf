//! 路由声明
//!
//! - `static_routes`: 无需登录即可访问，登出后仍然保留
//! - `dynamic_routes`: 前端控制路由时的完整声明，按角色过滤后注册；
//!   后端控制路由时只取其中的布局根路由作为外壳

use menuroute_shared::{
    ComponentRef, LOGIN_PATH, RouteMeta, RouteNode, ROOT_PATH, not_found_and_no_power,
};

pub fn static_routes() -> Vec<RouteNode> {
    let mut routes = vec![
        RouteNode::new(LOGIN_PATH, "login")
            .with_component(ComponentRef::view("login/index"))
            .with_meta(RouteMeta::titled("登录")),
    ];
    // 后端没有授予任何路由时也要能进入 401 页面
    routes.extend(not_found_and_no_power());
    routes
}

pub fn dynamic_routes() -> Vec<RouteNode> {
    vec![
        RouteNode::new(ROOT_PATH, "layout")
            .with_component(ComponentRef::view("layout/index"))
            .with_redirect("/home")
            .with_meta(RouteMeta::titled("布局").keep_alive())
            .with_children(vec![
                RouteNode::new("/home", "home")
                    .with_component(ComponentRef::view("home/index"))
                    .with_meta(
                        RouteMeta::titled("首页")
                            .with_roles(["admin", "common"])
                            .with_icon("iconfont icon-shouye")
                            .keep_alive()
                            .affix(),
                    ),
                RouteNode::new("/system", "system")
                    .with_component(ComponentRef::view("layout/routerView/parent"))
                    .with_redirect("/system/menu")
                    .with_meta(
                        RouteMeta::titled("系统设置")
                            .with_roles(["admin"])
                            .with_icon("iconfont icon-xitongshezhi"),
                    )
                    .with_children(vec![
                        RouteNode::new("/system/menu", "systemMenu")
                            .with_component(ComponentRef::view("system/menu/index"))
                            .with_meta(
                                RouteMeta::titled("菜单管理")
                                    .with_roles(["admin"])
                                    .keep_alive(),
                            ),
                        RouteNode::new("/system/user", "systemUser")
                            .with_component(ComponentRef::view("system/user/index"))
                            .with_meta(
                                RouteMeta::titled("用户管理")
                                    .with_roles(["admin"])
                                    .keep_alive(),
                            ),
                    ]),
                RouteNode::new("/params/details/:id", "paramsDetails")
                    .with_component(ComponentRef::view("params/details"))
                    .with_meta(
                        RouteMeta::titled("动态路由详情")
                            .with_roles(["admin", "common"])
                            .hidden(),
                    ),
            ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use menuroute::builder::front_end::build_front_end_table;
    use menuroute::{MemoryRouter, Router, RouterConfig};
    use menuroute_shared::NOT_FOUND_NAME;

    #[test]
    fn test_committed_layout_takes_over_static_fallbacks() {
        let router = MemoryRouter::with_routes(static_routes());
        let built = build_front_end_table(
            &dynamic_routes(),
            "admin",
            &not_found_and_no_power(),
            &RouterConfig::default(),
        )
        .unwrap();
        for route in built.table {
            router.add_route(route);
        }

        let not_found = router
            .get_routes()
            .into_iter()
            .filter(|r| r.name.as_deref() == Some(NOT_FOUND_NAME))
            .count();
        assert_eq!(not_found, 1);
        assert_eq!(router.resolve("/nope").unwrap().name, NOT_FOUND_NAME);

        assert!(router.remove_route("layout"));
        assert!(!router.has_route(NOT_FOUND_NAME));
        assert!(router.has_route("login"));
    }
}
