//! Coin and gem balances
//!
//! Earn operations floor and clamp negative amounts to zero; spend
//! operations are all-or-nothing. Balances can never go negative.

/// Currency balances for one player session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrencyLedger {
    coins: u64,
    gems: u64,
}

impl CurrencyLedger {
    pub fn new(coins: u64, gems: u64) -> Self {
        Self { coins, gems }
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn gems(&self) -> u64 {
        self.gems
    }

    /// Add coins. Negative amounts are treated as zero; no debt.
    pub fn add_coins(&mut self, amount: i64) {
        self.coins = self.coins.saturating_add(amount.max(0) as u64);
    }

    /// Add gems. Negative amounts are treated as zero.
    pub fn add_gems(&mut self, amount: i64) {
        self.gems = self.gems.saturating_add(amount.max(0) as u64);
    }

    /// Deduct `amount` coins iff the balance covers it.
    pub fn spend_coins(&mut self, amount: u64) -> bool {
        if self.coins >= amount {
            self.coins -= amount;
            true
        } else {
            false
        }
    }

    /// Deduct `amount` gems iff the balance covers it.
    pub fn spend_gems(&mut self, amount: u64) -> bool {
        if self.gems >= amount {
            self.gems -= amount;
            true
        } else {
            false
        }
    }
}
