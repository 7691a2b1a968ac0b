use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{ProjectionError, Result};
use crate::projection::LedgerEntry;
use crate::savings::account::Contribution;
use crate::types::{AccountId, CategoryId, ContributionId, EntryId};

/// counts from one derivation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub removed: usize,
}

/// contributions per savings account, derived from savings-category entries
/// or recorded directly
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributionLedger {
    category_accounts: HashMap<CategoryId, AccountId>,
    contributions: Vec<Contribution>,
}

impl ContributionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// entries tagged with `category` feed `account`
    pub fn link_category(&mut self, category: CategoryId, account: AccountId) {
        self.category_accounts.insert(category, account);
    }

    /// record a contribution that did not come from the ledger
    pub fn deposit(&mut self, contribution: Contribution) -> Result<ContributionId> {
        contribution.validate()?;
        let id = contribution.id;
        self.contributions.push(contribution);
        Ok(id)
    }

    /// derive contributions from the complete set of realized entries
    ///
    /// exactly one contribution exists per matching entry id; running this
    /// twice with the same entries changes nothing. derived contributions
    /// whose entry is gone or no longer tagged are dropped.
    pub fn sync_from_entries(&mut self, entries: &[LedgerEntry], contributed_by: &str) -> Result<SyncReport> {
        let tagged: Vec<(&LedgerEntry, AccountId)> = entries
            .iter()
            .filter_map(|e| {
                let account = e.category.as_ref().and_then(|c| self.category_accounts.get(c))?;
                Some((e, *account))
            })
            .collect();
        // nothing is touched unless every tagged entry is valid
        for (entry, _) in &tagged {
            entry.validate()?;
        }

        let mut report = SyncReport::default();
        let mut matched: HashSet<EntryId> = HashSet::new();
        let mut by_entry: HashMap<EntryId, usize> = self
            .contributions
            .iter()
            .enumerate()
            .filter_map(|(index, c)| c.source_entry.map(|entry| (entry, index)))
            .collect();

        for (entry, account) in tagged {
            matched.insert(entry.id);

            match by_entry.get(&entry.id).and_then(|&index| self.contributions.get_mut(index)) {
                Some(existing) => {
                    if existing.account == account && existing.amount == entry.amount && existing.date == entry.date {
                        report.unchanged += 1;
                    } else {
                        existing.account = account;
                        existing.amount = entry.amount;
                        existing.date = entry.date;
                        report.updated += 1;
                    }
                }
                None => {
                    let mut contribution = Contribution::new(account, entry.amount, contributed_by, entry.date);
                    contribution.source_entry = Some(entry.id);
                    by_entry.insert(entry.id, self.contributions.len());
                    self.contributions.push(contribution);
                    report.created += 1;
                }
            }
        }

        let before = self.contributions.len();
        self.contributions
            .retain(|c| c.source_entry.map_or(true, |entry| matched.contains(&entry)));
        report.removed = before - self.contributions.len();

        info!(
            created = report.created,
            updated = report.updated,
            unchanged = report.unchanged,
            removed = report.removed,
            "savings contributions derived"
        );
        Ok(report)
    }

    /// delete an account's contributions and category links
    pub fn remove_account(&mut self, account: AccountId) -> Vec<Contribution> {
        self.category_accounts.retain(|_, linked| *linked != account);
        let (removed, kept): (Vec<Contribution>, Vec<Contribution>) = std::mem::take(&mut self.contributions)
            .into_iter()
            .partition(|c| c.account == account);
        self.contributions = kept;
        debug!(account_id = %account, removed = removed.len(), "savings account removed");
        removed
    }

    pub fn remove_contribution(&mut self, id: ContributionId) -> Result<Contribution> {
        let index = self
            .contributions
            .iter()
            .position(|c| c.id == id)
            .ok_or(ProjectionError::ContributionNotFound { id })?;
        Ok(self.contributions.remove(index))
    }

    /// contributions of one account, in recording order
    pub fn for_account(&self, account: AccountId) -> Vec<Contribution> {
        self.contributions
            .iter()
            .filter(|c| c.account == account)
            .cloned()
            .collect()
    }

    pub fn all(&self) -> &[Contribution] {
        &self.contributions
    }

    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }
}
