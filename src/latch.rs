//! 初始化互斥
//!
//! 两次导航可能同时触发后端路由表的构建。这里把每一轮初始化串行化：
//! 后到的调用会等待前一轮结束，再由调用方检查状态决定是否还需要构建，
//! 从而避免路由被重复注册。

use futures::lock::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InitLatch {
    lock: Mutex<()>,
}

/// 持有期间，其他初始化调用会在 `enter` 处等待
pub struct InitCycle<'a> {
    _guard: MutexGuard<'a, ()>,
    id: Uuid,
}

impl InitCycle<'_> {
    /// 本轮初始化的 id，用于日志关联
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl InitLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn enter(&self) -> InitCycle<'_> {
        let guard = self.lock.lock().await;
        InitCycle {
            _guard: guard,
            id: Uuid::new_v4(),
        }
    }
}
