#[macro_use]
extern crate quickcheck_macros;

mod linked;

use quickcheck::{Arbitrary, Gen};

/// Installs a test logger once so `RUST_LOG=debug` shows what the tree is doing.
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<T> {
    /// Add the element to the data structure
    Add(T),
    /// Remove one copy of the element from the data structure
    Remove(T),
    /// Rebuild the tree with minimal height
    Rebalance,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Add(T::arbitrary(g)),
            1 => Op::Remove(T::arbitrary(g)),
            2 => Op::Rebalance,
            _ => unreachable!(),
        }
    }
}
