//! CSV ledger file

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use bank_core::{Amount, BankError, BankResult, Group, GroupName};
use bank_ledger::Ledger;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::LedgerStore;

/// One stored row
///
/// Numeric columns are read as text so that values written as decimals
/// (`"12.0"`) still load, floored to whole units.
#[derive(Debug, Serialize, Deserialize)]
struct GroupRecord {
    #[serde(rename = "Group Name")]
    name: String,
    #[serde(rename = "Rank")]
    rank: String,
    #[serde(rename = "Ans. Questions")]
    answered: String,
    #[serde(rename = "Wealth")]
    wealth: String,
}

impl GroupRecord {
    fn from_group(group: &Group) -> Self {
        GroupRecord {
            name: group.name.to_string(),
            rank: group.rank.to_string(),
            answered: group.answered.to_string(),
            wealth: group.wealth.to_string(),
        }
    }

    fn into_group(self, line: u64) -> BankResult<Group> {
        let name = GroupName::new(&self.name)?;
        let answered = parse_units(&self.answered, "Ans. Questions", line)?;
        let answered = u32::try_from(answered).map_err(|_| {
            BankError::Storage(format!("line {line}: Ans. Questions out of range: {answered}"))
        })?;
        let wealth = parse_units(&self.wealth, "Wealth", line)?;
        // Rank is informational only; the ledger recomputes it
        Ok(Group {
            name,
            rank: 1,
            answered,
            wealth,
        })
    }
}

fn parse_units(text: &str, column: &str, line: u64) -> BankResult<i64> {
    text.parse::<Amount>()
        .map(Amount::units)
        .map_err(|_| BankError::Storage(format!("line {line}: bad {column} value {text:?}")))
}

fn storage_err(e: impl std::fmt::Display) -> BankError {
    BankError::Storage(e.to_string())
}

/// Ledger stored as a CSV file
#[derive(Clone, Debug)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse ledger rows from CSV text
    pub fn read_from(reader: impl Read) -> BankResult<Ledger> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut groups = Vec::new();
        for (i, record) in csv_reader.deserialize::<GroupRecord>().enumerate() {
            let record = record.map_err(storage_err)?;
            // line 1 is the header
            groups.push(record.into_group(i as u64 + 2)?);
        }
        Ledger::from_groups(groups)
    }

    /// Write ledger rows as CSV text, header first
    pub fn write_to(ledger: &Ledger, writer: impl io::Write) -> BankResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        if ledger.is_empty() {
            csv_writer
                .write_record(["Group Name", "Rank", "Ans. Questions", "Wealth"])
                .map_err(storage_err)?;
        }
        for group in ledger.iter() {
            csv_writer
                .serialize(GroupRecord::from_group(group))
                .map_err(storage_err)?;
        }
        csv_writer.flush().map_err(storage_err)
    }
}

impl LedgerStore for CsvStore {
    fn load(&self) -> BankResult<Ledger> {
        let mut text = String::new();
        match File::open(&self.path) {
            Ok(mut file) => {
                file.read_to_string(&mut text).map_err(storage_err)?;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no ledger file, starting empty");
                return Ok(Ledger::new());
            }
            Err(e) => return Err(storage_err(e)),
        }

        if text.trim().is_empty() {
            debug!(path = %self.path.display(), "empty ledger file, starting empty");
            return Ok(Ledger::new());
        }

        let ledger = Self::read_from(text.as_bytes())?;
        info!(path = %self.path.display(), groups = ledger.len(), "ledger loaded");
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> BankResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Write beside the target, then rename over it
        let mut tmp = NamedTempFile::new_in(dir).map_err(storage_err)?;
        Self::write_to(ledger, &mut tmp)?;
        tmp.as_file().sync_all().map_err(storage_err)?;
        tmp.persist(&self.path).map_err(|e| storage_err(e.error))?;

        info!(path = %self.path.display(), groups = ledger.len(), "ledger saved");
        Ok(())
    }
}
