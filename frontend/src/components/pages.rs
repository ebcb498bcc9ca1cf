use leptos::prelude::*;

use crate::web::router::{Link, use_router};

#[component]
fn PageCard(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{title}</h2>
                {children()}
            </div>
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let router = use_router();
    let user_name = move || {
        router.revision().get();
        router
            .context()
            .current_user()
            .ok()
            .flatten()
            .map(|info| info.user_name)
            .unwrap_or_default()
    };

    view! {
        <PageCard title="首页">
            <p>"欢迎回来，" {user_name}</p>
            <Link to="/params/details/42" class="link link-primary">"查看动态路由示例"</Link>
        </PageCard>
    }
}

/// 多级菜单的父级页面，只负责展示子路由列表
#[component]
pub fn ParentView() -> impl IntoView {
    let router = use_router();
    let children = move || {
        let current = router.current_route().get();
        let Some(current) = current else {
            return Vec::new();
        };
        router
            .context()
            .state()
            .menu_list()
            .into_iter()
            .find(|m| m.name == current.name)
            .map(|m| m.children)
            .unwrap_or_default()
    };

    view! {
        <PageCard title="子菜单">
            <ul class="menu">
                {move || {
                    children()
                        .into_iter()
                        .map(|child| {
                            let title = child.meta.title.clone().unwrap_or_else(|| child.name.clone());
                            view! { <li><Link to=child.path>{title}</Link></li> }
                        })
                        .collect_view()
                }}
            </ul>
        </PageCard>
    }
}

#[component]
pub fn SystemMenuPage() -> impl IntoView {
    let router = use_router();
    let routes = move || {
        router.revision().get();
        router.context().state().route_list()
    };

    view! {
        <PageCard title="菜单管理">
            <table class="table table-sm">
                <thead>
                    <tr><th>"name"</th><th>"path"</th><th>"roles"</th><th>"缓存"</th></tr>
                </thead>
                <tbody>
                    {move || {
                        routes()
                            .into_iter()
                            .map(|r| {
                                let roles = r.meta.roles.clone().unwrap_or_default().join(", ");
                                view! {
                                    <tr>
                                        <td>{r.name}</td>
                                        <td>{r.path}</td>
                                        <td>{roles}</td>
                                        <td>{if r.meta.is_keep_alive { "是" } else { "否" }}</td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </PageCard>
    }
}

#[component]
pub fn SystemUserPage() -> impl IntoView {
    view! {
        <PageCard title="用户管理">
            <p class="text-base-content/70">"仅 admin 角色可见"</p>
        </PageCard>
    }
}

#[component]
pub fn ParamsDetailsPage() -> impl IntoView {
    let router = use_router();
    let dynamic_path = move || {
        router
            .current_route()
            .get()
            .and_then(|r| r.meta.is_dynamic_path)
            .unwrap_or_default()
    };

    view! {
        <PageCard title="动态路由详情">
            <p>"匹配的路由：" <code>{dynamic_path}</code></p>
        </PageCard>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"页面未找到"</p>
                <Link to="/home" class="btn btn-primary mt-6">"返回首页"</Link>
            </div>
        </div>
    }
}

#[component]
pub fn NoPowerPage() -> impl IntoView {
    let router = use_router();
    let on_logout = move |_| crate::auth::logout(router);

    view! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-warning">"401"</h1>
                <p class="text-xl mt-4">"您未被授权访问任何页面"</p>
                <button class="btn btn-primary mt-6" on:click=on_logout>"重新登录"</button>
            </div>
        </div>
    }
}
