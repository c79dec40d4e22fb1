use crate::domain::{CategoryFilter, Goal, NewGoal, Transaction};
use crate::metrics::filter_transactions;
use crate::sample;

/// Session state shared by the pages: the goal list plus the expenses
/// search and category selection. Lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub goals: Vec<Goal>,
    pub search: String,
    pub category: CategoryFilter,
}

impl AppState {
    pub fn from_samples() -> Self {
        Self {
            goals: sample::goals(),
            ..Self::default()
        }
    }

    /// Appends a goal with the next free id and returns it.
    pub fn add_goal(&mut self, new_goal: NewGoal) -> &Goal {
        let id = self.goals.iter().map(|g| g.id).max().unwrap_or(0) + 1;
        log::info!("adding goal '{}' (id {id})", new_goal.name);
        self.goals.push(new_goal.into_goal(id));
        &self.goals[self.goals.len() - 1]
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn visible_transactions<'a>(
        &self,
        transactions: &'a [Transaction],
    ) -> impl Iterator<Item = &'a Transaction> + Clone + use<'a> {
        filter_transactions(transactions, &self.search, self.category)
    }
}
