//! 布局外壳：侧边栏菜单、标签页与内容区
//!
//! 菜单与标签页都来自共享状态的快照，状态版本号变化时重新读取。

use leptos::prelude::*;
use menuroute_shared::RouteNode;

use crate::auth::logout;
use crate::web::router::{Link, use_router};

fn route_title(route: &RouteNode) -> String {
    route.meta.title.clone().unwrap_or_else(|| route.name.clone())
}

fn menu_item(route: RouteNode) -> AnyView {
    let title = route_title(&route);
    let visible: Vec<RouteNode> = route
        .children
        .into_iter()
        .filter(|c| !c.meta.is_hide)
        .collect();

    if visible.is_empty() {
        return view! { <li><Link to=route.path>{title}</Link></li> }.into_any();
    }
    view! {
        <li>
            <details open>
                <summary>{title}</summary>
                <ul>{visible.into_iter().map(menu_item).collect_view()}</ul>
            </details>
        </li>
    }
    .into_any()
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let router = use_router();

    let snapshot = move || {
        router.revision().get();
        router.context().state().snapshot()
    };
    let current_name = move || router.current_route().get().map(|r| r.name).unwrap_or_default();
    let app_title = router.context().config().app_title.clone();

    view! {
        <div class="drawer lg:drawer-open">
            <div class="drawer-content flex flex-col min-h-screen bg-base-200">
                <header class="navbar bg-base-100 shadow-sm">
                    <div class="flex-1 text-lg font-semibold">{app_title}</div>
                    <button class="btn btn-ghost btn-sm" on:click=move |_| logout(router)>
                        "退出登录"
                    </button>
                </header>

                <nav class="tabs tabs-boxed m-2">
                    {move || {
                        snapshot()
                            .tags_view_routes
                            .into_iter()
                            .map(|tag| {
                                let name = tag.name.clone();
                                let title = route_title(&tag);
                                let class = move || {
                                    if current_name() == name { "tab tab-active" } else { "tab" }
                                };
                                view! { <Link to=tag.path class=class()>{title}</Link> }
                            })
                            .collect_view()
                    }}
                </nav>

                <main class="p-4">{children()}</main>
            </div>

            <aside class="drawer-side">
                <ul class="menu bg-base-100 w-56 min-h-full">
                    {move || {
                        snapshot()
                            .menu_list
                            .into_iter()
                            .filter(|m| !m.meta.is_hide)
                            .map(menu_item)
                            .collect_view()
                    }}
                </ul>
            </aside>
        </div>
    }
}
