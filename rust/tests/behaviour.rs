use rbtree::{KeyOrder, RBTree};

fn pairs<'a>(tree: &'a RBTree<i32, &'static str>) -> Vec<(i32, &'a str)> {
    tree.iter().map(|(k, v)| (*k, *v)).collect()
}

#[test]
fn test_unique_tree_walkthrough() {
    let mut tree = RBTree::new();
    tree.insert(5, "e");
    tree.insert(3, "c");
    tree.insert(8, "h");
    tree.insert(1, "a");

    assert_eq!(pairs(&tree), vec![(1, "a"), (3, "c"), (5, "e"), (8, "h")]);
    assert_eq!(tree.lower_bound(&4), Some((&5, &"e")));

    assert_eq!(tree.delete(&3), Some("c"));
    assert_eq!(pairs(&tree), vec![(1, "a"), (5, "e"), (8, "h")]);
    assert_eq!(tree.len(), 3);
    assert!(tree.check_invariants());
}

#[test]
fn test_duplicate_tree_walkthrough() {
    let mut tree = RBTree::multi();
    tree.insert(2, "x");
    tree.insert(2, "y");

    assert_eq!(tree.len(), 2);
    let low = tree.lower_bound_node(&2).unwrap();
    let high = tree.upper_bound_node(&2).unwrap();
    assert_eq!(tree.entry(low), Some((&2, &"x")));
    assert_eq!(tree.entry(high), Some((&2, &"y")));
    assert_eq!(pairs(&tree), vec![(2, "x"), (2, "y")]);
}

#[test]
fn test_deleting_missing_key_is_a_miss() {
    let mut tree: RBTree<i32, &str> = RBTree::from([(1, "a"), (2, "b")]);
    assert_eq!(tree.delete(&7), None);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.delete(&1), Some("a"));
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_bounds_walk_past_equal_run() {
    let mut tree = RBTree::multi();
    for (k, v) in [(1, "a"), (3, "b"), (3, "c"), (3, "d"), (5, "e"), (3, "f")] {
        tree.insert(k, v);
    }

    // From the lower bound, successors cover every equal entry and then
    // land on the first greater one.
    let mut id = tree.lower_bound_node(&3);
    let mut run = Vec::new();
    while let Some(node) = id {
        let (k, v) = tree.entry(node).unwrap();
        if *k != 3 {
            break;
        }
        run.push(*v);
        id = tree.successor(node);
    }
    assert_eq!(run, vec!["b", "c", "d", "f"]);
    assert_eq!(id.and_then(|node| tree.entry(node)), Some((&5, &"e")));

    // The successor of the upper bound is the first strictly greater key.
    let upper = tree.upper_bound_node(&3).unwrap();
    let after = tree.successor(upper).unwrap();
    assert_eq!(tree.entry(after), Some((&5, &"e")));
    let last = tree.upper_bound_node(&5).unwrap();
    assert_eq!(tree.successor(last), None);
}

#[test]
fn test_min_max_and_walks() {
    let tree: RBTree<i32, i32> = (0..100).rev().map(|i| (i, -i)).collect();
    let mut forward = Vec::new();
    let mut id = tree.minimum();
    while let Some(node) = id {
        forward.push(*tree.entry(node).unwrap().0);
        id = tree.successor(node);
    }
    assert_eq!(forward, (0..100).collect::<Vec<_>>());

    let mut backward = Vec::new();
    let mut id = tree.maximum();
    while let Some(node) = id {
        backward.push(*tree.entry(node).unwrap().0);
        id = tree.predecessor(node);
    }
    assert_eq!(backward, (0..100).rev().collect::<Vec<_>>());
}

#[test]
fn test_custom_ordering_end_to_end() {
    let case_insensitive = KeyOrder::new(|a: &String, b: &String| {
        a.to_lowercase().cmp(&b.to_lowercase())
    });
    let mut tree = RBTree::with_ordering(case_insensitive);
    tree.insert("Banana".to_string(), 2);
    tree.insert("apple".to_string(), 1);
    assert_eq!(tree.insert("BANANA".to_string(), 3), Some(2));

    let keys: Vec<&str> = tree.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["apple", "Banana"]);
    assert_eq!(tree.get(&"APPLE".to_string()), Some(&1));
    assert_eq!(
        tree.lower_bound(&"b".to_string()),
        Some((&"Banana".to_string(), &3))
    );

    // Back to byte order: uppercase sorts first.
    tree.reset_ordering().unwrap();
    let keys: Vec<&str> = tree.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Banana", "apple"]);
}

#[test]
fn test_failed_reordering_leaves_tree_usable() {
    let mut tree: RBTree<i32, i32> = (0..64).map(|i| (i, i)).collect();
    let before: Vec<i32> = tree.keys().copied().collect();
    // Claims every key is greater than every other: never a total order.
    let broken = KeyOrder::new(|_: &i32, _: &i32| std::cmp::Ordering::Greater);
    let err = tree.set_ordering(broken).unwrap_err();
    assert!(err.is_ordering_violation());
    assert!(!tree.has_custom_ordering());
    assert!(tree.check_invariants());
    assert_eq!(tree.len(), 64);
    assert_eq!(tree.keys().copied().collect::<Vec<_>>(), before);

    tree.insert(1000, 0);
    assert_eq!(tree.delete(&10), Some(10));
    assert!(tree.check_invariants());
}

#[test]
fn test_default_resolver_never_stores() {
    let mut tree: RBTree<i32, Vec<i32>> = RBTree::new();
    tree.set_default_fn(|tree, key| vec![*key; tree.len() + 1]);
    assert_eq!(tree.lookup(&4).unwrap().into_owned(), vec![4]);
    tree.insert(1, vec![]);
    assert_eq!(tree.lookup(&4).unwrap().into_owned(), vec![4, 4]);
    assert_eq!(tree.len(), 1);
    assert!(tree.fetch(&4).unwrap_err().is_key_not_found());
}
