use rbtree::{KeyOrder, RBTree};

#[test]
fn test_json_round_trip() {
    let tree: RBTree<i32, String> = (0..50).map(|i| (i * 3, format!("v{}", i))).collect();
    let json = serde_json::to_string(&tree).unwrap();
    assert!(json.starts_with("[50,[0,\"v0\"],[3,\"v1\"]"));

    let back: RBTree<i32, String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tree);
    assert!(back.check_invariants());
}

#[test]
fn test_round_trip_is_stable() {
    let tree = RBTree::from([("b", 2), ("a", 1), ("c", 3)]);
    let first = serde_json::to_string(&tree).unwrap();
    let back: RBTree<String, i32> = serde_json::from_str(&first).unwrap();
    let second = serde_json::to_string(&back).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, r#"[3,["a",1],["b",2],["c",3]]"#);
}

#[test]
fn test_duplicates_survive_multi_round_trip() {
    let mut tree = RBTree::multi();
    tree.insert(1, 'a');
    tree.insert(1, 'b');
    tree.insert(0, 'z');
    let json = serde_json::to_string(&tree).unwrap();
    assert_eq!(json, r#"[3,[0,"z"],[1,"a"],[1,"b"]]"#);

    let multi = RBTree::<i32, char>::deserialize_multi(&mut serde_json::Deserializer::from_str(&json)).unwrap();
    assert!(multi.allows_duplicates());
    assert_eq!(multi, tree);

    // Read back as a unique tree, later entries win.
    let unique: RBTree<i32, char> = serde_json::from_str(&json).unwrap();
    assert_eq!(unique.len(), 2);
    assert_eq!(unique.get(&1), Some(&'b'));
}

#[test]
fn test_refusals() {
    let empty: RBTree<i32, i32> = RBTree::new();
    let err = serde_json::to_string(&empty).unwrap_err();
    assert!(err.to_string().contains("tree is empty"));

    let mut custom = RBTree::with_ordering(KeyOrder::new(|a: &i32, b: &i32| b.cmp(a)));
    custom.insert(1, 1);
    let err = serde_json::to_string(&custom).unwrap_err();
    assert!(err.to_string().contains("custom ordering"));

    custom.reset_ordering().unwrap();
    assert_eq!(serde_json::to_string(&custom).unwrap(), "[1,[1,1]]");
}

#[test]
fn test_malformed_records() {
    let negative = serde_json::from_str::<RBTree<i32, i32>>("[-3]");
    assert!(negative.unwrap_err().to_string().contains("negative entry count"));

    let short = serde_json::from_str::<RBTree<i32, i32>>("[2,[1,1]]");
    assert!(short.is_err());

    let empty = serde_json::from_str::<RBTree<i32, i32>>("[0]").unwrap();
    assert!(empty.is_empty());
}
