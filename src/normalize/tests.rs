use super::*;
use menuroute_shared::RouteMeta;

fn sample_tree() -> Vec<RouteNode> {
    vec![
        RouteNode::new("/", "layout")
            .with_meta(RouteMeta::titled("layout").keep_alive())
            .with_children(vec![
                RouteNode::new("/home", "home").with_meta(RouteMeta::titled("home").keep_alive()),
                RouteNode::new("/system", "system")
                    .with_meta(RouteMeta::titled("system"))
                    .with_children(vec![
                        RouteNode::new("/system/menu", "systemMenu")
                            .with_meta(RouteMeta::titled("menu").keep_alive()),
                        RouteNode::new("/system/user", "systemUser")
                            .with_children(vec![RouteNode::new("/system/user/:id", "systemUserDetail")]),
                    ]),
                RouteNode::new("/about", "about"),
            ]),
    ]
}

fn names(nodes: &[RouteNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
}

// =========================================================
// flatten
// =========================================================

#[test]
fn test_flatten_is_pre_order() {
    let tree = sample_tree();
    let total: usize = tree.iter().map(RouteNode::count).sum();

    let flat = flatten(tree);
    assert_eq!(flat.len(), total);
    assert_eq!(
        names(&flat),
        vec![
            "layout",
            "home",
            "system",
            "systemMenu",
            "systemUser",
            "systemUserDetail",
            "about"
        ]
    );
    assert!(flat.iter().all(|n| n.children.is_empty()));
}

#[test]
fn test_flatten_keeps_sibling_order_across_top_level() {
    let tree = vec![
        RouteNode::new("/a", "a").with_children(vec![RouteNode::new("/a/1", "a1")]),
        RouteNode::new("/b", "b"),
    ];
    assert_eq!(names(&flatten(tree)), vec!["a", "a1", "b"]);
}

#[test]
fn test_flatten_empty() {
    assert!(flatten(Vec::new()).is_empty());
}

// =========================================================
// renest
// =========================================================

#[test]
fn test_renest_single_root_with_all_children() {
    let flat = flatten(sample_tree());
    let n = flat.len();

    let stage = renest(flat).unwrap();
    assert_eq!(stage.table.len(), 1);
    assert_eq!(stage.root().unwrap().name, "layout");
    assert_eq!(stage.children().len(), n - 1);
    assert!(stage.children().iter().all(|c| c.children.is_empty()));
}

#[test]
fn test_renest_marks_dynamic_paths() {
    let stage = renest(flatten(sample_tree())).unwrap();
    let detail = stage
        .children()
        .iter()
        .find(|c| c.name == "systemUserDetail")
        .unwrap();
    assert!(detail.meta.is_dynamic);
    assert_eq!(detail.meta.is_dynamic_path.as_deref(), Some("/system/user/:id"));

    let about = stage.children().iter().find(|c| c.name == "about").unwrap();
    assert!(!about.meta.is_dynamic);
    assert!(about.meta.is_dynamic_path.is_none());
}

#[test]
fn test_renest_collects_keep_alive_names() {
    let stage = renest(flatten(sample_tree())).unwrap();
    assert_eq!(stage.keep_alive_names, vec!["home", "systemMenu"]);
}

#[test]
fn test_renest_root_without_keep_alive_caches_nothing() {
    let mut tree = sample_tree();
    tree[0].meta.is_keep_alive = false;
    let stage = renest(flatten(tree)).unwrap();
    assert!(stage.keep_alive_names.is_empty());
}

#[test]
fn test_renest_root_not_first() {
    let flat = vec![
        RouteNode::new("/home", "home"),
        RouteNode::new("/", "layout"),
        RouteNode::new("/about", "about"),
    ];
    let stage = renest(flat).unwrap();
    assert_eq!(stage.root().unwrap().name, "layout");
    assert_eq!(names(stage.children()), vec!["home", "about"]);
}

#[test]
fn test_renest_empty_short_circuits() {
    let stage = renest(Vec::new()).unwrap();
    assert!(stage.is_empty());
    assert!(stage.children().is_empty());
}

#[test]
fn test_renest_rejects_missing_or_duplicate_root() {
    let err = renest(vec![RouteNode::new("/home", "home")]).unwrap_err();
    assert_eq!(err.status, crate::error::RouteErrorStatus::InvalidInput);

    let err = renest(vec![RouteNode::new("/", "a"), RouteNode::new("/", "b")]).unwrap_err();
    assert_eq!(err.status, crate::error::RouteErrorStatus::InvalidInput);
}
