//! Holding representation: one row of the allocation export.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AssetClass;
use crate::error::{AllocationError, AllocationResult};

/// A single holding row.
///
/// Holds the dollar amount the brokerage attributes to each asset class.
/// Classes absent from `allocations` count as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker or other short identifier.
    pub symbol: String,

    /// Free-text description of the security.
    pub description: String,

    /// Owning account, possibly masked (e.g. `*1234`).
    pub account_id: String,

    /// Dollar amount per asset class. All values are non-negative.
    pub allocations: BTreeMap<AssetClass, Decimal>,
}

impl Holding {
    /// Creates a new holding builder.
    #[must_use]
    pub fn builder() -> HoldingBuilder {
        HoldingBuilder::new()
    }

    /// Returns the amount allocated to `class`, or zero.
    #[must_use]
    pub fn amount(&self, class: AssetClass) -> Decimal {
        self.allocations.get(&class).copied().unwrap_or(Decimal::ZERO)
    }

    /// Returns the sum of all allocation amounts.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.allocations.values().copied().sum()
    }

    /// Returns true if the holding carries no value in any class.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.allocations.values().all(Decimal::is_zero)
    }
}

/// Builder for [`Holding`].
#[derive(Debug, Clone, Default)]
pub struct HoldingBuilder {
    symbol: Option<String>,
    description: String,
    account_id: String,
    allocations: BTreeMap<AssetClass, Decimal>,
}

impl HoldingBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the symbol. Surrounding whitespace is trimmed.
    #[must_use]
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into().trim().to_string());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the account identifier. Surrounding whitespace is trimmed.
    #[must_use]
    pub fn account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = account_id.into().trim().to_string();
        self
    }

    /// Sets the amount for one asset class, replacing any earlier value.
    #[must_use]
    pub fn allocation(mut self, class: AssetClass, amount: Decimal) -> Self {
        self.allocations.insert(class, amount);
        self
    }

    /// Sets several class amounts at once.
    #[must_use]
    pub fn allocations<I>(mut self, amounts: I) -> Self
    where
        I: IntoIterator<Item = (AssetClass, Decimal)>,
    {
        self.allocations.extend(amounts);
        self
    }

    /// Builds the holding.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is missing or blank, or if any
    /// allocation amount is negative.
    pub fn build(self) -> AllocationResult<Holding> {
        let symbol = self
            .symbol
            .ok_or_else(|| AllocationError::missing_field("symbol"))?;

        if symbol.is_empty() {
            return Err(AllocationError::missing_field("symbol"));
        }

        if let Some((class, amount)) = self
            .allocations
            .iter()
            .find(|(_, amount)| amount.is_sign_negative() && !amount.is_zero())
        {
            return Err(AllocationError::invalid_holding(
                &symbol,
                format!("{} amount cannot be negative ({amount})", class.label()),
            ));
        }

        Ok(Holding {
            symbol,
            description: self.description,
            account_id: self.account_id,
            allocations: self.allocations,
        })
    }
}
