//! Competition ranking ("min" method)
//!
//! A group's rank is one plus the number of groups holding strictly more
//! wealth. Ties share the lowest rank of their set and the following rank
//! skips accordingly: wealths [100, 100, 80] rank as [1, 1, 3].

/// Rank every balance, returning ranks in input order
pub fn competition_ranks(wealths: &[i64]) -> Vec<u32> {
    let mut descending = wealths.to_vec();
    descending.sort_unstable_by(|a, b| b.cmp(a));

    wealths
        .iter()
        .map(|w| {
            let richer = descending.partition_point(|other| other > w);
            richer as u32 + 1
        })
        .collect()
}
