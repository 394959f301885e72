//! Strongly-typed request records for the OSCU business operations.
//!
//! Wire names follow the upstream's camelCase abbreviations (`bhfId`,
//! `dftPrc`, `taxblAmtA`, ...). Optional fields are skipped when `None`.
//!
//! Types only capture shape. Ranges, lengths, formats and required-ness of
//! fields that are `Option` here are still enforced by the schema rules before
//! a record is sent.

use serde::{Deserialize, Serialize};

/// `"Y"` / `"N"` flag used throughout the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YesNo {
    #[serde(rename = "Y")]
    Yes,
    #[default]
    #[serde(rename = "N")]
    No,
}

impl From<bool> for YesNo {
    fn from(b: bool) -> Self {
        if b { Self::Yes } else { Self::No }
    }
}

/// Registrar / modifier audit columns shared by most write operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registrant {
    pub regr_id: String,
    pub regr_nm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modr_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modr_nm: Option<String>,
}

impl Registrant {
    /// Same user registers and modifies the record.
    pub fn same(id: impl Into<String>, name: impl Into<String>) -> Self {
        let (id, name) = (id.into(), name.into());
        Self {
            modr_id: Some(id.clone()),
            modr_nm: Some(name.clone()),
            regr_id: id,
            regr_nm: name,
        }
    }
}

/// Per-band taxable amounts, rates and tax amounts (bands A–E) plus totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSummary {
    pub taxbl_amt_a: f64,
    pub taxbl_amt_b: f64,
    pub taxbl_amt_c: f64,
    pub taxbl_amt_d: f64,
    pub taxbl_amt_e: f64,
    pub tax_rt_a: f64,
    pub tax_rt_b: f64,
    pub tax_rt_c: f64,
    pub tax_rt_d: f64,
    pub tax_rt_e: f64,
    pub tax_amt_a: f64,
    pub tax_amt_b: f64,
    pub tax_amt_c: f64,
    pub tax_amt_d: f64,
    pub tax_amt_e: f64,
    pub tot_taxbl_amt: f64,
    pub tot_tax_amt: f64,
    pub tot_amt: f64,
}

// ── Initialization & lookups ──────────────────────────────────────────────────

/// Device initialization (`selectInitOsdcInfo`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitInfoRequest {
    pub tin: String,
    pub bhf_id: String,
    pub dvc_srl_no: String,
}

/// Incremental lookups keyed on the last request time (`yyyyMMddHHmmss`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRequest {
    pub last_req_dt: String,
}

impl LastRequest {
    pub fn new(last_req_dt: impl Into<String>) -> Self {
        Self {
            last_req_dt: last_req_dt.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSearchRequest {
    pub custm_tin: String,
}

// ── Branch records ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchCustomer {
    pub cust_no: String,
    pub cust_tin: String,
    pub cust_nm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adrs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tel_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub use_yn: YesNo,
    #[serde(flatten)]
    pub registrant: Registrant,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchUser {
    pub user_id: String,
    pub user_nm: String,
    pub pwd: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adrs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cntc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_cd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub use_yn: YesNo,
    #[serde(flatten)]
    pub registrant: Registrant,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchInsurance {
    pub isrcc_cd: String,
    pub isrcc_nm: String,
    pub isrc_rt: f64,
    pub use_yn: YesNo,
    #[serde(flatten)]
    pub registrant: Registrant,
}

// ── Items ─────────────────────────────────────────────────────────────────────

/// Item master record (`saveItem`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_cd: String,
    pub item_cls_cd: String,
    pub item_ty_cd: String,
    pub item_nm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_std_nm: Option<String>,
    pub orgn_nat_cd: String,
    pub pkg_unit_cd: String,
    pub qty_unit_cd: String,
    pub tax_ty_cd: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub btch_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcd: Option<String>,
    pub dft_prc: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grp_prc_l1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grp_prc_l2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grp_prc_l3: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grp_prc_l4: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grp_prc_l5: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sfty_qty: Option<f64>,
    pub isrc_aplcb_yn: YesNo,
    pub use_yn: YesNo,
    #[serde(flatten)]
    pub registrant: Registrant,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemComposition {
    pub item_cd: String,
    pub cpst_item_cd: String,
    pub cpst_qty: f64,
    #[serde(flatten)]
    pub registrant: Registrant,
}

/// Customs-imported item status update (`updateImportItem`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportItemUpdate {
    pub task_cd: String,
    pub dcl_de: String,
    pub item_seq: i64,
    pub hs_cd: String,
    pub item_cls_cd: String,
    pub item_cd: String,
    pub impt_item_stts_cd: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub modr_id: String,
    pub modr_nm: String,
}

// ── Sales ─────────────────────────────────────────────────────────────────────

/// Sales invoice (`saveTrnsSalesOsdc`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTransaction {
    pub trd_invc_no: String,
    pub invc_no: i64,
    pub org_invc_no: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cust_tin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cust_nm: Option<String>,
    pub rcpt_ty_cd: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pmt_ty_cd: Option<String>,
    pub sales_stts_cd: String,
    /// `yyyyMMddHHmmss`
    pub cfm_dt: String,
    /// `yyyyMMdd`
    pub sales_dt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_rls_dt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cncl_req_dt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cncl_dt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfd_dt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfd_rsn_cd: Option<String>,
    pub tot_item_cnt: i64,
    #[serde(flatten)]
    pub tax: TaxSummary,
    pub prchr_acptc_yn: YesNo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(flatten)]
    pub registrant: Registrant,
    pub receipt: Receipt,
    pub item_list: Vec<SalesItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cust_tin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cust_mbl_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpt_no: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trde_nm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adrs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub btm_msg: Option<String>,
    pub prchr_acptc_yn: YesNo,
    /// `yyyyMMddHHmmss`
    pub rcpt_pbct_dt: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesItem {
    pub item_seq: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_cls_cd: Option<String>,
    pub item_cd: String,
    pub item_nm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcd: Option<String>,
    pub pkg_unit_cd: String,
    pub pkg: f64,
    pub qty_unit_cd: String,
    pub qty: f64,
    pub prc: f64,
    pub sply_amt: f64,
    pub dc_rt: f64,
    pub dc_amt: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isrcc_cd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isrcc_nm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isrc_rt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isrc_amt: Option<f64>,
    pub tax_ty_cd: String,
    pub taxbl_amt: f64,
    pub tax_amt: f64,
    pub tot_amt: f64,
}

// ── Purchases ─────────────────────────────────────────────────────────────────

/// Purchase confirmation (`insertTrnsPurchase`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spplr_tin: Option<String>,
    pub invc_no: i64,
    pub org_invc_no: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spplr_bhf_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spplr_nm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spplr_invc_no: Option<i64>,
    pub reg_ty_cd: String,
    pub pchs_ty_cd: String,
    pub rcpt_ty_cd: String,
    pub pmt_ty_cd: String,
    pub pchs_stts_cd: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfm_dt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pchs_dt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrhs_dt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cncl_req_dt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cncl_dt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfd_dt: Option<String>,
    pub tot_item_cnt: i64,
    #[serde(flatten)]
    pub tax: TaxSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(flatten)]
    pub registrant: Registrant,
    pub item_list: Vec<PurchaseItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    pub item_seq: i64,
    pub item_cd: String,
    pub item_cls_cd: String,
    pub item_nm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spplr_item_cls_cd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spplr_item_cd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spplr_item_nm: Option<String>,
    pub pkg_unit_cd: String,
    pub pkg: f64,
    pub qty_unit_cd: String,
    pub qty: f64,
    pub prc: f64,
    pub sply_amt: f64,
    pub dc_rt: f64,
    pub dc_amt: f64,
    pub taxbl_amt: f64,
    pub tax_ty_cd: String,
    pub tax_amt: f64,
    pub tot_amt: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_expr_dt: Option<String>,
}

// ── Stock ─────────────────────────────────────────────────────────────────────

/// Stock in/out movement (`insertStockIO`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub tin: String,
    pub bhf_id: String,
    pub sar_no: i64,
    pub org_sar_no: i64,
    pub reg_ty_cd: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cust_tin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cust_nm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cust_bhf_id: Option<String>,
    pub sar_ty_cd: String,
    /// `yyyyMMdd`
    pub ocrn_dt: String,
    pub tot_item_cnt: i64,
    pub tot_taxbl_amt: f64,
    pub tot_tax_amt: f64,
    pub tot_amt: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(flatten)]
    pub registrant: Registrant,
    pub item_list: Vec<StockMovementItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementItem {
    pub item_seq: i64,
    pub item_cd: String,
    pub item_cls_cd: String,
    pub item_nm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcd: Option<String>,
    pub pkg_unit_cd: String,
    pub pkg: f64,
    pub qty_unit_cd: String,
    pub qty: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_expr_dt: Option<String>,
    pub prc: f64,
    pub sply_amt: f64,
    pub tot_dc_amt: f64,
    pub taxbl_amt: f64,
    pub tax_ty_cd: String,
    pub tax_amt: f64,
    pub tot_amt: f64,
}

/// Remaining stock for one item (`saveStockMaster`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMaster {
    pub item_cd: String,
    pub rsd_qty: f64,
    #[serde(flatten)]
    pub registrant: Registrant,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_wire_names() {
        let item = Item {
            item_cd: "KE1NTXU0000001".into(),
            grp_prc_l1: Some(90.0),
            use_yn: YesNo::Yes,
            registrant: Registrant::same("admin", "Admin"),
            ..Default::default()
        };
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(v["itemCd"], "KE1NTXU0000001");
        assert_eq!(v["grpPrcL1"], 90.0);
        assert_eq!(v["useYn"], "Y");
        assert_eq!(v["isrcAplcbYn"], "N");
        assert_eq!(v["regrId"], "admin");
        assert_eq!(v["modrNm"], "Admin");
        assert!(v.get("grpPrcL2").is_none());
        assert!(v.get("registrant").is_none());
    }

    #[test]
    fn test_sales_transaction_flattens_tax_bands() {
        let tx = SalesTransaction {
            tax: TaxSummary {
                taxbl_amt_b: 100.0,
                tax_rt_b: 16.0,
                tax_amt_b: 16.0,
                ..Default::default()
            },
            item_list: vec![SalesItem {
                item_seq: 1,
                ..Default::default()
            }],
            ..Default::default()
        };
        let v = serde_json::to_value(&tx).unwrap();
        assert_eq!(v["taxblAmtB"], 100.0);
        assert_eq!(v["taxRtB"], 16.0);
        assert_eq!(v["itemList"][0]["itemSeq"], 1);
        assert!(v["receipt"].is_object());
        assert!(v.get("tax").is_none());
    }

    #[test]
    fn test_init_request_deserializes_from_wire() {
        let req: InitInfoRequest = serde_json::from_value(json!({
            "tin": "P051234567A",
            "bhfId": "00",
            "dvcSrlNo": "dvc-001"
        }))
        .unwrap();
        assert_eq!(req.bhf_id, "00");
        assert_eq!(req.dvc_srl_no, "dvc-001");
    }

    #[test]
    fn test_yes_no_from_bool() {
        assert_eq!(YesNo::from(true), YesNo::Yes);
        assert_eq!(serde_json::to_value(YesNo::from(false)).unwrap(), json!("N"));
    }
}
