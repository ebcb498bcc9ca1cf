//! 视图注册表
//!
//! 路由记录中的视图 key（`home/index`、`system/menu/index` ...）到页面组件的映射。
//! 后端返回的组件路径在解析阶段被换算成这些 key。
//! 布局外壳不在表中，由路由出口直接包裹。

use leptos::prelude::*;
use menuroute::ViewRegistry;

use crate::components::login::LoginPage;
use crate::components::pages::*;

/// 页面组件工厂
pub type ViewFactory = fn() -> AnyView;

pub fn view_registry() -> ViewRegistry<ViewFactory> {
    ViewRegistry::new()
        .register("login/index", (|| view! { <LoginPage /> }.into_any()) as ViewFactory)
        .register("layout/routerView/parent", || view! { <ParentView /> }.into_any())
        .register("home/index", || view! { <HomePage /> }.into_any())
        .register("system/menu/index", || view! { <SystemMenuPage /> }.into_any())
        .register("system/user/index", || view! { <SystemUserPage /> }.into_any())
        .register("params/details", || view! { <ParamsDetailsPage /> }.into_any())
        .register("error/404", || view! { <NotFoundPage /> }.into_any())
        .register("error/401", || view! { <NoPowerPage /> }.into_any())
}
