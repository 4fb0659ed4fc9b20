use crate::credentials::{CostPolicy, Hasher, RememberManager};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    pub cost_policy: CostPolicy,
}

impl GlobalArgs {
    #[must_use]
    pub const fn new(cost_policy: CostPolicy) -> Self {
        Self { cost_policy }
    }

    #[must_use]
    pub const fn hasher(&self) -> Hasher {
        Hasher::new(self.cost_policy)
    }

    #[must_use]
    pub const fn remember_manager(&self) -> RememberManager {
        RememberManager::new(self.hasher())
    }
}
