use super::*;
use pretty_assertions::assert_eq;

#[test]
fn declare_and_get() {
    let mut tree = ScopeTree::new();
    let root = tree.root();
    tree.declare_number(root, "x").expect("declare x");
    tree.declare_string(root, "s").expect("declare s");

    assert_eq!(tree.get(root, "x"), Some(&Value::Number(0.0)));
    assert_eq!(tree.get(root, "s"), Some(&Value::Text(String::new())));
    assert_eq!(tree.get(root, "missing"), None);
}

#[test]
fn redeclaration_in_same_scope_is_rejected() {
    let mut tree = ScopeTree::new();
    let root = tree.root();
    tree.declare_number(root, "x").expect("first declaration");
    assert_eq!(
        tree.declare_string(root, "x"),
        Err(AlreadyDeclared { name: "x".into() })
    );
}

#[test]
fn child_sees_parent_bindings() {
    let mut tree = ScopeTree::new();
    let root = tree.root();
    tree.declare_number(root, "x").expect("declare");
    tree.set(root, "x", Value::Number(7.0));

    let child = tree.child(root);
    let grandchild = tree.child(child);
    assert_eq!(tree.get(grandchild, "x"), Some(&Value::Number(7.0)));
    assert_eq!(tree.parent(grandchild), Some(child));
}

#[test]
fn shadowing_leaves_outer_binding_alone() {
    let mut tree = ScopeTree::new();
    let root = tree.root();
    tree.declare_number(root, "x").expect("outer");
    tree.set(root, "x", Value::Number(1.0));

    let inner = tree.child(root);
    tree.declare_number(inner, "x").expect("inner shadow");
    assert!(tree.set_existing(inner, "x", Value::Number(99.0)));

    assert_eq!(tree.get(inner, "x"), Some(&Value::Number(99.0)));
    assert_eq!(tree.get(root, "x"), Some(&Value::Number(1.0)));
}

#[test]
fn set_existing_writes_nearest_ancestor() {
    let mut tree = ScopeTree::new();
    let root = tree.root();
    tree.declare_number(root, "count").expect("declare");
    let inner = tree.child(root);

    assert!(tree.set_existing(inner, "count", Value::Number(3.0)));
    assert_eq!(tree.get(root, "count"), Some(&Value::Number(3.0)));
    assert!(tree.scope(inner).variables().next().is_none());
}

#[test]
fn set_existing_reports_missing_binding() {
    let mut tree = ScopeTree::new();
    let root = tree.root();
    assert!(!tree.set_existing(root, "ghost", Value::Number(1.0)));
    assert_eq!(tree.get(root, "ghost"), None);
}

#[test]
fn set_falls_back_to_current_scope() {
    let mut tree = ScopeTree::new();
    let root = tree.root();
    let inner = tree.child(root);

    tree.set(inner, "fresh", Value::Text("new".into()));
    assert_eq!(tree.get(inner, "fresh"), Some(&Value::Text("new".into())));
    assert_eq!(tree.get(root, "fresh"), None);
}

#[test]
fn function_lookup_walks_ancestors() {
    let mut tree = ScopeTree::new();
    let root = tree.root();
    let header = NodeId::new(4);
    tree.declare_function(root, "double", header).expect("declare fn");
    let body = tree.child(root);

    assert_eq!(tree.lookup_function(body, "double"), Some(header));
    assert_eq!(tree.lookup_function(body, "triple"), None);
    assert!(tree.declare_function(root, "double", header).is_err());
}

#[test]
fn bindings_omit_shadowed_names() {
    let mut tree = ScopeTree::new();
    let root = tree.root();
    tree.declare_number(root, "a").expect("a");
    tree.declare_number(root, "b").expect("b");
    let inner = tree.child(root);
    tree.declare_string(inner, "a").expect("inner a");

    let names: Vec<_> = tree
        .bindings(inner)
        .into_iter()
        .map(|(name, value)| (name, value.kind()))
        .collect();
    assert_eq!(
        names,
        vec![("a", ValueKind::Text), ("b", ValueKind::Number)]
    );
}
