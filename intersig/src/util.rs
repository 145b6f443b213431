use rustc_hash::FxHashSet;

/// Return the first element seen twice, if any
pub(crate) fn first_duplicate<I>(iter: I) -> Option<I::Item>
where
  I: IntoIterator,
  I::Item: Eq + std::hash::Hash + Copy,
{
  let mut seen = FxHashSet::default();
  iter.into_iter().find(|x| !seen.insert(*x))
}
