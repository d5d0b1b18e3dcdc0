//! Bulk aggregate query options.

use std::cmp::Ordering;

type Filter<'q, A> = Box<dyn Fn(&A) -> bool + 'q>;
type Comparator<'q, A> = Box<dyn Fn(&A, &A) -> Ordering + 'q>;

/// Candidate ids, filter and sort for a bulk aggregate read.
///
/// `AggregateQuery::all()` assembles every record of the kind in table
/// order.
pub struct AggregateQuery<'q, I, A> {
    ids: Option<Vec<I>>,
    filter: Option<Filter<'q, A>>,
    sort: Option<Comparator<'q, A>>,
}

impl<I, A> Default for AggregateQuery<'_, I, A> {
    fn default() -> Self {
        Self {
            ids: None,
            filter: None,
            sort: None,
        }
    }
}

impl<'q, I, A> AggregateQuery<'q, I, A> {
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts assembly to `ids`, in the given order.
    pub fn with_ids(ids: impl IntoIterator<Item = I>) -> Self {
        Self {
            ids: Some(ids.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn filter(mut self, predicate: impl Fn(&A) -> bool + 'q) -> Self {
        self.filter = Some(Box::new(predicate));
        self
    }

    pub fn sort_by(mut self, compare: impl Fn(&A, &A) -> Ordering + 'q) -> Self {
        self.sort = Some(Box::new(compare));
        self
    }

    pub(crate) fn run(
        self,
        all_ids: impl FnOnce() -> Vec<I>,
        assemble: impl Fn(&I) -> Option<A>,
    ) -> Vec<A> {
        let ids = self.ids.unwrap_or_else(all_ids);
        let mut aggregates: Vec<A> = ids.iter().filter_map(assemble).collect();
        if let Some(filter) = &self.filter {
            aggregates.retain(|aggregate| filter(aggregate));
        }
        if let Some(compare) = &self.sort {
            aggregates.sort_by(|left, right| compare(left, right));
        }
        aggregates
    }
}

impl<I: std::fmt::Debug, A> std::fmt::Debug for AggregateQuery<'_, I, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregateQuery")
            .field("ids", &self.ids)
            .field("filter", &self.filter.is_some())
            .field("sort", &self.sort.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::AggregateQuery;

    #[test]
    fn filter_runs_before_stable_sort() {
        let query = AggregateQuery::<u32, (u32, char)>::with_ids([1, 2, 3, 4, 5])
            .filter(|(n, _)| *n != 3)
            .sort_by(|left, right| left.1.cmp(&right.1));
        let letters = ['b', 'a', 'x', 'b', 'a'];
        let result = query.run(Vec::new, |n| Some((*n, letters[(*n - 1) as usize])));
        assert_eq!(result, vec![(2, 'a'), (5, 'a'), (1, 'b'), (4, 'b')]);
    }

    #[test]
    fn unresolved_ids_are_dropped_and_default_uses_all_ids() {
        let query = AggregateQuery::<u32, u32>::all();
        let result = query.run(|| vec![1, 2, 3], |n| (*n != 2).then_some(*n * 10));
        assert_eq!(result, vec![10, 30]);
    }
}
