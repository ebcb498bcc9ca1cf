//! 路由树规整
//!
//! 多级嵌套的路由树先被展开成一维数组，再重新组织成只有两级的结构：
//! 布局根路由 `/` 作为唯一的顶级路由，其余路由全部成为它的直接子路由。
//! keep-alive 只支持二级缓存，所以需要这一步。

use crate::error::{RouteError, RouteResult};
use menuroute_shared::RouteNode;

/// 两级路由表及规整过程中收集的缓存名
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TwoStage {
    /// 至多一个顶级路由（布局根路由）
    pub table: Vec<RouteNode>,
    /// 需要 keep-alive 缓存的路由 name
    pub keep_alive_names: Vec<String>,
}

impl TwoStage {
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn root(&self) -> Option<&RouteNode> {
        self.table.first()
    }

    pub fn root_mut(&mut self) -> Option<&mut RouteNode> {
        self.table.first_mut()
    }

    /// 根路由的子路由，空表时返回空切片
    pub fn children(&self) -> &[RouteNode] {
        self.root().map(|r| r.children.as_slice()).unwrap_or(&[])
    }
}

/// 多级嵌套路由展开成一维数组
///
/// 先序深度优先：父路由后面紧跟它（递归展开后）的子路由，声明顺序保持不变。
/// 输出中的节点不再携带 children。
pub fn flatten(tree: Vec<RouteNode>) -> Vec<RouteNode> {
    let mut flat = Vec::with_capacity(tree.iter().map(RouteNode::count).sum());
    for node in tree {
        push_pre_order(node, &mut flat);
    }
    flat
}

fn push_pre_order(mut node: RouteNode, out: &mut Vec<RouteNode>) {
    let children = std::mem::take(&mut node.children);
    out.push(node);
    for child in children {
        push_pre_order(child, out);
    }
}

/// 一维数组重新组织成两级路由
///
/// - path 为 `/` 的路由成为唯一的顶级路由，children 置空后依次接收其余路由
/// - path 含参数段（`/user/:id`）时写入 `meta.is_dynamic` 与 `meta.is_dynamic_path`，
///   标签页据此区分 `/user/:id` 与具体的 `/user/42`
/// - 根路由与当前路由都开启 `is_keep_alive` 时，记录当前路由的 name
///
/// 空数组直接返回空结果；缺少根路由或存在多个根路由时返回错误。
pub fn renest(flat: Vec<RouteNode>) -> RouteResult<TwoStage> {
    if flat.is_empty() {
        return Ok(TwoStage::default());
    }

    let mut roots = flat.iter().enumerate().filter(|(_, r)| r.is_root());
    let root_index = match (roots.next(), roots.next()) {
        (Some((index, _)), None) => index,
        (None, _) => {
            return Err(RouteError::invalid_input("route tree has no layout root `/`")
                .in_op("normalize.renest"));
        }
        (Some(_), Some(_)) => {
            return Err(RouteError::invalid_input("route tree has more than one layout root")
                .in_op("normalize.renest"));
        }
    };

    let mut flat = flat;
    let mut root = flat.remove(root_index);
    root.children = Vec::new();

    let mut children = Vec::with_capacity(flat.len());
    for mut node in flat {
        if node.has_param_segment() {
            node.meta.is_dynamic = true;
            node.meta.is_dynamic_path = Some(node.path.clone());
        }
        children.push(node);
    }

    let keep_alive_names = if root.meta.is_keep_alive {
        children
            .iter()
            .filter(|c| c.meta.is_keep_alive)
            .map(|c| c.name.clone())
            .collect()
    } else {
        Vec::new()
    };

    root.children = children;
    Ok(TwoStage {
        table: vec![root],
        keep_alive_names,
    })
}

#[cfg(test)]
mod tests;
