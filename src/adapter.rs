use std::rc::Rc;

use crate::error::RouteResult;
use async_trait::async_trait;
use menuroute_shared::RouteNode;

// =========================================================
// 抽象路由器接口
// =========================================================

/// 路由器中已注册的一条记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredRoute {
    pub name: Option<String>,
    pub path: String,
}

/// 底层路由器：负责路由的注册、删除与匹配
///
/// 运行在单线程事件循环中，所有方法都通过内部可变性修改自身。
pub trait Router {
    /// 注册一条路由（连同其 children）
    fn add_route(&self, route: RouteNode);
    /// 按 name 删除路由，返回是否删除成功
    fn remove_route(&self, name: &str) -> bool;
    fn has_route(&self, name: &str) -> bool;
    /// 列出所有已注册的路由（嵌套路由展开列出）
    fn get_routes(&self) -> Vec<RegisteredRoute>;
    /// 将 URL path 匹配到已注册的路由节点
    fn resolve(&self, path: &str) -> Option<RouteNode>;
}

impl<T: Router + ?Sized> Router for Rc<T> {
    fn add_route(&self, route: RouteNode) {
        (**self).add_route(route)
    }

    fn remove_route(&self, name: &str) -> bool {
        (**self).remove_route(name)
    }

    fn has_route(&self, name: &str) -> bool {
        (**self).has_route(name)
    }

    fn get_routes(&self) -> Vec<RegisteredRoute> {
        (**self).get_routes()
    }

    fn resolve(&self, path: &str) -> Option<RouteNode> {
        (**self).resolve(path)
    }
}

// =========================================================
// 抽象会话存储接口
// =========================================================

/// 会话存储：token 与用户信息都保存在这里
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
    fn clear(&self);
}

impl<T: SessionStore + ?Sized> SessionStore for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> bool {
        (**self).remove(key)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

// =========================================================
// 远程路由源接口
// =========================================================

/// 后端控制路由时的路由来源（已由服务端按权限过滤）
#[async_trait(?Send)]
pub trait RouteSource {
    async fn fetch_routes(&self) -> RouteResult<Vec<RouteNode>>;
}

// =========================================================
// 抽象环境变量接口
// =========================================================

pub trait EnvAdapter {
    fn var(&self, name: &str) -> Option<String>;
}
