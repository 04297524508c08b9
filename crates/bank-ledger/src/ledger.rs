//! Ledger - ordered collection of groups keyed by name

use std::collections::HashMap;

use bank_core::{Amount, BankError, BankResult, Group, GroupName, InflationRate};
use tracing::debug;

use crate::competition_ranks;

/// The ledger - authoritative wealth and answer counts for every group
///
/// Rows keep insertion order for display; the name index gives direct
/// lookup. Ranks are recomputed after every mutation, so any borrowed view
/// of the ledger is always consistent.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    /// Rows in insertion order
    groups: Vec<Group>,
    /// Row position by name
    index: HashMap<GroupName, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Rebuild a ledger from stored rows
    ///
    /// Stored ranks are ignored and recomputed from wealth. Fails on the
    /// first repeated name without building anything.
    pub fn from_groups(rows: impl IntoIterator<Item = Group>) -> BankResult<Self> {
        let mut ledger = Ledger::new();
        for group in rows {
            if ledger.index.contains_key(&group.name) {
                return Err(BankError::DuplicateGroup(group.name));
            }
            ledger.index.insert(group.name.clone(), ledger.groups.len());
            ledger.groups.push(group);
        }
        ledger.rank();
        Ok(ledger)
    }

    /// Append a new group with nothing answered and no wealth
    pub fn add_group(&mut self, name: GroupName) -> BankResult<&Group> {
        if self.index.contains_key(&name) {
            return Err(BankError::DuplicateGroup(name));
        }
        debug!(group = %name, "adding group");

        let position = self.groups.len();
        self.index.insert(name.clone(), position);
        self.groups.push(Group::new(name));
        self.rank();
        Ok(&self.groups[position])
    }

    /// Credit a group and count one more answered question
    pub fn deposit(&mut self, name: &str, amount: Amount) -> BankResult<&Group> {
        let position = self.position(name)?;
        let group = &mut self.groups[position];
        group.wealth = group.wealth.saturating_add(amount.units());
        group.answered = group.answered.saturating_add(1);
        debug!(group = %group.name, amount = amount.units(), wealth = group.wealth, "deposit");

        self.rank();
        Ok(&self.groups[position])
    }

    /// Debit a group
    ///
    /// Wealth is not floored at zero; a group may go into debt.
    pub fn withdraw(&mut self, name: &str, amount: Amount) -> BankResult<&Group> {
        let position = self.position(name)?;
        let group = &mut self.groups[position];
        group.wealth = group.wealth.saturating_sub(amount.units());
        debug!(group = %group.name, amount = amount.units(), wealth = group.wealth, "withdraw");

        self.rank();
        Ok(&self.groups[position])
    }

    /// Inflate every balance by the same rate
    ///
    /// Each new balance depends only on that group's previous balance.
    pub fn apply_inflation(&mut self, rate: InflationRate) {
        for group in &mut self.groups {
            group.wealth = rate.apply(group.wealth);
        }
        debug!(rate = rate.percent(), groups = self.groups.len(), "inflation applied");
        self.rank();
    }

    /// Recompute every group's competition rank from wealth
    pub fn rank(&mut self) {
        let wealths: Vec<i64> = self.groups.iter().map(|g| g.wealth).collect();
        for (group, rank) in self.groups.iter_mut().zip(competition_ranks(&wealths)) {
            group.rank = rank;
        }
    }

    /// Get a group by name; surrounding whitespace is ignored
    pub fn get(&self, name: &str) -> Option<&Group> {
        self.index.get(name.trim()).map(|&i| &self.groups[i])
    }

    /// Rows in display order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Names are matched the way [`GroupName`] stores them, trimmed
    fn position(&self, name: &str) -> BankResult<usize> {
        let key = name.trim();
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| BankError::GroupNotFound(key.to_string()))
    }
}
