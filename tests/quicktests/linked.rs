use linked_bst::{Tree, TreeError};

use std::collections::HashMap;

use crate::{init_logger, Op};

/// Applies a set of operations to a tree and a count of each element.
/// This way we can ensure that after a random smattering of adds,
/// removes and rebalances we have the same multiset in both.
fn do_ops(ops: &[Op<i8>], bst: &mut Tree<i8>, counts: &mut HashMap<i8, usize>) {
    for op in ops {
        match op {
            Op::Add(x) => {
                bst.add(*x);
                *counts.entry(*x).or_default() += 1;
            }
            Op::Remove(x) => match counts.get_mut(x) {
                Some(count) if *count > 0 => {
                    assert_eq!(bst.remove(x), Ok(*x));
                    *count -= 1;
                }
                _ => assert_eq!(bst.remove(x), Err(TreeError::NotFound)),
            },
            Op::Rebalance => bst.rebalance(),
        }
    }
}

/// Smallest possible height of a tree holding `len` elements.
fn minimal_height(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()).saturating_sub(1) as usize
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    init_logger();
    let mut tree = Tree::new();
    let mut counts = HashMap::new();

    do_ops(&ops, &mut tree, &mut counts);
    tree.len() == counts.values().sum::<usize>()
        && counts
            .iter()
            .all(|(x, count)| tree.contains(x) == (*count > 0))
}

#[quickcheck]
fn inorder_is_sorted(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    let mut sorted = xs;
    sorted.sort_unstable();
    tree.inorder() == sorted.iter().collect::<Vec<_>>()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.find(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    nots.iter()
        .filter(|x| !xs.contains(*x))
        .all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();

    let mut still_present = xs;
    for delete in &deletes {
        // Each removal takes away a single copy of the element.
        match still_present.iter().position(|x| x == delete) {
            Some(pos) => {
                still_present.swap_remove(pos);
                assert_eq!(tree.remove(delete), Ok(*delete));
            }
            None => assert_eq!(tree.remove(delete), Err(TreeError::NotFound)),
        }
    }

    tree.len() == still_present.len() && still_present.iter().all(|x| tree.find(x).is_some())
}

#[quickcheck]
fn rebalance_keeps_order_and_minimises_height(xs: Vec<i8>) -> bool {
    init_logger();
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let before: Vec<i8> = tree.inorder().into_iter().copied().collect();
    let height = tree.height();

    tree.rebalance();

    tree.inorder().into_iter().copied().collect::<Vec<_>>() == before
        && tree.height() <= height
        && tree.height() == minimal_height(xs.len())
        && tree.len() == xs.len()
}

#[quickcheck]
fn range_find_matches_filter(xs: Vec<i8>, low: i8, high: i8, rebalance: bool) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    if rebalance {
        tree.rebalance();
    }

    let mut expected: Vec<_> = xs.iter().filter(|x| low <= **x && **x <= high).collect();
    expected.sort_unstable();
    tree.range_find(&low, &high) == expected
}

#[quickcheck]
fn successor_and_predecessor(xs: Vec<i8>, probe: i8) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    tree.successor(&probe) == xs.iter().filter(|x| **x > probe).min()
        && tree.predecessor(&probe) == xs.iter().filter(|x| **x < probe).max()
}

#[quickcheck]
fn preorder_iteration_visits_everything(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    // The first element added becomes the root, which preorder visits first.
    let root_first = tree.iter().next() == xs.first();

    let mut visited: Vec<_> = tree.iter().copied().collect();
    visited.sort_unstable();
    let mut sorted = xs;
    sorted.sort_unstable();
    root_first && visited == sorted
}
