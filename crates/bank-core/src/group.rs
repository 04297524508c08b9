//! Group identity and ledger rows

use std::borrow::Borrow;
use std::fmt;

use crate::{BankError, BankResult};

/// Group name - the unique key of a ledger row
///
/// Always trimmed and never blank.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupName(String);

impl GroupName {
    pub fn new(name: impl AsRef<str>) -> BankResult<Self> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BankError::InvalidGroupName(name.as_ref().to_string()));
        }
        Ok(GroupName(trimmed.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for GroupName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group({})", self.0)
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One competing group
///
/// `rank` is derived from wealth by the ledger; it is never a source of truth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub name: GroupName,
    pub rank: u32,
    pub answered: u32,
    pub wealth: i64,
}

impl Group {
    /// A freshly added group: nothing answered, no wealth
    pub fn new(name: GroupName) -> Self {
        Group {
            name,
            rank: 1,
            answered: 0,
            wealth: 0,
        }
    }
}
