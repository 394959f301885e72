//! The OSCU business operations and the payload schema each one requires.

use etims_schema::SchemaName;
use etims_types::EtimsError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SelectInitOsdcInfo,
    SelectCodeList,
    SelectCustomer,
    SelectNoticeList,
    SelectItemClsList,
    SelectItemList,
    SaveItem,
    SaveItemComposition,
    SelectBhfList,
    SaveBhfCustomer,
    SaveBhfUser,
    SaveBhfInsurance,
    SelectImportItemList,
    UpdateImportItem,
    SaveTrnsSalesOsdc,
    SelectTrnsPurchaseSalesList,
    InsertTrnsPurchase,
    SelectStockMoveList,
    InsertStockIo,
    SaveStockMaster,
}

impl Operation {
    /// Logical endpoint name, as understood by the [`EndpointRegistry`](crate::EndpointRegistry).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SelectInitOsdcInfo => "selectInitOsdcInfo",
            Self::SelectCodeList => "selectCodeList",
            Self::SelectCustomer => "selectCustomer",
            Self::SelectNoticeList => "selectNoticeList",
            Self::SelectItemClsList => "selectItemClsList",
            Self::SelectItemList => "selectItemList",
            Self::SaveItem => "saveItem",
            Self::SaveItemComposition => "saveItemComposition",
            Self::SelectBhfList => "selectBhfList",
            Self::SaveBhfCustomer => "saveBhfCustomer",
            Self::SaveBhfUser => "saveBhfUser",
            Self::SaveBhfInsurance => "saveBhfInsurance",
            Self::SelectImportItemList => "selectImportItemList",
            Self::UpdateImportItem => "updateImportItem",
            Self::SaveTrnsSalesOsdc => "saveTrnsSalesOsdc",
            Self::SelectTrnsPurchaseSalesList => "selectTrnsPurchaseSalesList",
            Self::InsertTrnsPurchase => "insertTrnsPurchase",
            Self::SelectStockMoveList => "selectStockMoveList",
            Self::InsertStockIo => "insertStockIO",
            Self::SaveStockMaster => "saveStockMaster",
        }
    }

    /// Schema the payload is validated against before dispatch.
    #[must_use]
    pub fn schema(self) -> SchemaName {
        match self {
            Self::SelectInitOsdcInfo => SchemaName::Initialization,
            Self::SelectCodeList
            | Self::SelectNoticeList
            | Self::SelectItemClsList
            | Self::SelectItemList
            | Self::SelectBhfList
            | Self::SelectImportItemList
            | Self::SelectTrnsPurchaseSalesList
            | Self::SelectStockMoveList => SchemaName::LastRequestOnly,
            Self::SelectCustomer => SchemaName::SelectCustomer,
            Self::SaveItem => SchemaName::Item,
            Self::SaveItemComposition => SchemaName::ItemComposition,
            Self::SaveBhfCustomer => SchemaName::BranchCustomer,
            Self::SaveBhfUser => SchemaName::BranchUser,
            Self::SaveBhfInsurance => SchemaName::BranchInsurance,
            Self::UpdateImportItem => SchemaName::ImportItemUpdate,
            Self::SaveTrnsSalesOsdc => SchemaName::SalesTransaction,
            Self::InsertTrnsPurchase => SchemaName::Purchase,
            Self::InsertStockIo => SchemaName::StockMovement,
            Self::SaveStockMaster => SchemaName::StockMaster,
        }
    }

    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::SelectInitOsdcInfo,
            Self::SelectCodeList,
            Self::SelectCustomer,
            Self::SelectNoticeList,
            Self::SelectItemClsList,
            Self::SelectItemList,
            Self::SaveItem,
            Self::SaveItemComposition,
            Self::SelectBhfList,
            Self::SaveBhfCustomer,
            Self::SaveBhfUser,
            Self::SaveBhfInsurance,
            Self::SelectImportItemList,
            Self::UpdateImportItem,
            Self::SaveTrnsSalesOsdc,
            Self::SelectTrnsPurchaseSalesList,
            Self::InsertTrnsPurchase,
            Self::SelectStockMoveList,
            Self::InsertStockIo,
            Self::SaveStockMaster,
        ]
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Operation {
    type Err = EtimsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| EtimsError::Config(format!("unknown operation: {s}")))
    }
}
