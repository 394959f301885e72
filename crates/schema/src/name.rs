use etims_types::EtimsError;
use std::fmt;

/// Identifies one of the payload schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaName {
    Initialization,
    LastRequestOnly,
    SelectCustomer,
    BranchCustomer,
    BranchUser,
    BranchInsurance,
    Item,
    ItemComposition,
    SalesTransaction,
    ImportItemUpdate,
    StockMaster,
    Purchase,
    StockMovement,
}

impl SchemaName {
    /// The schema's lookup key, as used in configuration and on the CLI.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initialization => "initialization",
            Self::LastRequestOnly => "lastReqOnly",
            Self::SelectCustomer => "selectCustomer",
            Self::BranchCustomer => "saveBhfCustomer",
            Self::BranchUser => "saveBhfUser",
            Self::BranchInsurance => "saveBhfInsurance",
            Self::Item => "saveItem",
            Self::ItemComposition => "saveItemComposition",
            Self::SalesTransaction => "saveTrnsSalesOsdc",
            Self::ImportItemUpdate => "importItemUpdate",
            Self::StockMaster => "saveStockMaster",
            Self::Purchase => "insertTrnsPurchase",
            Self::StockMovement => "insertStockIO",
        }
    }

    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Initialization,
            Self::LastRequestOnly,
            Self::SelectCustomer,
            Self::BranchCustomer,
            Self::BranchUser,
            Self::BranchInsurance,
            Self::Item,
            Self::ItemComposition,
            Self::SalesTransaction,
            Self::ImportItemUpdate,
            Self::StockMaster,
            Self::Purchase,
            Self::StockMovement,
        ]
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SchemaName {
    type Err = EtimsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| EtimsError::Config(format!("schema '{s}' not defined")))
    }
}
