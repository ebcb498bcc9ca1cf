//! 动态路由管理后台前端
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `routes`: 静态路由与前端控制的路由声明
//! - `views`: 视图 key 到页面组件的注册表
//! - `web::router`: 路由服务（核心引擎），每次导航都经过导航守卫
//! - `auth`: 登录/登出
//! - `components`: UI 组件层

mod auth;
mod components {
    pub mod layout;
    pub mod login;
    pub mod pages;
}
mod env;
mod routes;
mod views;

use std::rc::Rc;

use crate::components::layout::Layout;
use crate::components::pages::NotFoundPage;
use crate::views::{ViewFactory, view_registry};

use leptos::prelude::*;
use menuroute::{MemoryRouter, RouteContext, ViewRegistry};
use menuroute_shared::{LOGIN_PATH, RouteNode};

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web;

use web::router::{Router, RouterOutlet};
use web::{HttpRouteSource, SessionStorage};

/// 视图注册表，供路由出口按 key 取页面组件
#[derive(Clone, Copy)]
struct ViewStore(StoredValue<Rc<ViewRegistry<ViewFactory>>, LocalStorage>);

/// 路由匹配函数
///
/// 按路由记录中的视图 key 取页面组件；登录页全屏显示，其余页面包裹在布局中。
fn route_matcher(route: RouteNode) -> AnyView {
    let page = use_context::<ViewStore>()
        .zip(route.component.as_ref())
        .and_then(|(ViewStore(views), component)| {
            views.with_value(|v| v.get(component.as_str()).copied())
        });
    let page = match page {
        Some(factory) => factory(),
        None => view! { <NotFoundPage /> }.into_any(),
    };

    if route.path == LOGIN_PATH {
        page
    } else {
        view! { <Layout>{page}</Layout> }.into_any()
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构建期配置
    let config = env::load_config();

    // 2. 组装路由上下文
    let views = Rc::new(view_registry());
    let source = HttpRouteSource::new(config.menu_url.clone(), config.token_key.clone());
    let front_end = !config.is_back_end();
    let ctx = RouteContext::new(
        config,
        Rc::new(MemoryRouter::new()),
        SessionStorage,
        source,
        views.clone(),
    )
    .with_static_routes(routes::static_routes())
    .with_dynamic_routes(routes::dynamic_routes());

    // 3. 前端控制路由：刷新后立即恢复，后端控制路由由导航守卫按需加载
    if front_end {
        if let Err(e) = ctx.init_front_end_control_routes() {
            web_sys::console::error_1(&format!("[App] failed to restore routes: {}", e).into());
        }
    }

    provide_context(ViewStore(StoredValue::new_local(views)));

    view! {
        <Router ctx=Rc::new(ctx)>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
