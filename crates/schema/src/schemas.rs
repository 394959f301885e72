//! Field rule tables for every payload schema.

use crate::name::SchemaName;
use crate::rule::{Check, FieldRule, Schema};
use regex::Regex;
use std::sync::LazyLock;

static DIGITS_14: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{14}$").expect("DIGITS_14 should compile - this is a bug"));
static DIGITS_8: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{8}$").expect("DIGITS_8 should compile - this is a bug"));

const YES_NO: &[&str] = &["Y", "N"];

const TAX_BAND_FIELDS: &[&str] = &[
    "taxblAmtA",
    "taxblAmtB",
    "taxblAmtC",
    "taxblAmtD",
    "taxblAmtE",
    "taxRtA",
    "taxRtB",
    "taxRtC",
    "taxRtD",
    "taxRtE",
    "taxAmtA",
    "taxAmtB",
    "taxAmtC",
    "taxAmtD",
    "taxAmtE",
    "totTaxblAmt",
    "totTaxAmt",
    "totAmt",
];

// ── Check chains ──────────────────────────────────────────────────────────────

fn text() -> Vec<Check> {
    vec![Check::String, Check::NotEmpty]
}

fn text_len(min: usize, max: usize) -> Vec<Check> {
    vec![Check::String, Check::NotEmpty, Check::len(min, max)]
}

fn text_max(max: usize) -> Vec<Check> {
    vec![Check::String, Check::NotEmpty, Check::max_len(max)]
}

fn string_max(max: usize) -> Vec<Check> {
    vec![Check::String, Check::max_len(max)]
}

fn string_len(min: usize, max: usize) -> Vec<Check> {
    vec![Check::String, Check::len(min, max)]
}

fn tin() -> Vec<Check> {
    text_len(1, 20)
}

fn bhf_id() -> Vec<Check> {
    text_len(1, 10)
}

/// `yyyyMMddHHmmss`
fn timestamp() -> Vec<Check> {
    vec![
        Check::String,
        Check::Pattern {
            regex: &DIGITS_14,
            format: "yyyyMMddHHmmss",
        },
    ]
}

/// `yyyyMMdd`
fn date() -> Vec<Check> {
    vec![
        Check::String,
        Check::Pattern {
            regex: &DIGITS_8,
            format: "yyyyMMdd",
        },
    ]
}

fn yes_no() -> Vec<Check> {
    vec![Check::OneOf(YES_NO)]
}

fn number() -> Vec<Check> {
    vec![Check::Number]
}

fn numeric_min(min: f64) -> Vec<Check> {
    vec![Check::Numeric, Check::Min(min)]
}

fn integer_min(min: f64) -> Vec<Check> {
    vec![Check::Integer, Check::Min(min)]
}

fn req(name: &'static str, checks: Vec<Check>) -> FieldRule {
    FieldRule::required(name, checks)
}

fn opt(name: &'static str, checks: Vec<Check>) -> FieldRule {
    FieldRule::optional(name, checks)
}

/// `regrId`/`regrNm` required, `modrId`/`modrNm` optional strings.
fn registrant_loose() -> Vec<FieldRule> {
    vec![
        req("regrId", text()),
        req("regrNm", text()),
        opt("modrId", vec![Check::String]),
        opt("modrNm", vec![Check::String]),
    ]
}

/// All four audit columns required with upstream column widths.
fn registrant_strict() -> Vec<FieldRule> {
    vec![
        req("regrId", text_max(20)),
        req("regrNm", text_max(60)),
        req("modrId", text_max(20)),
        req("modrNm", text_max(60)),
    ]
}

fn tax_bands() -> Vec<FieldRule> {
    TAX_BAND_FIELDS.iter().map(|&f| req(f, number())).collect()
}

// ── Schemas ───────────────────────────────────────────────────────────────────

fn initialization() -> Schema {
    Schema::new(vec![
        req("tin", tin()),
        req("bhfId", bhf_id()),
        req("dvcSrlNo", text()),
    ])
}

fn last_request_only() -> Schema {
    Schema::new(vec![req("lastReqDt", timestamp())])
}

fn select_customer() -> Schema {
    Schema::new(vec![req("custmTin", tin())])
}

fn branch_customer() -> Schema {
    let mut fields = vec![
        req("custNo", text()),
        req("custTin", tin()),
        req("custNm", text()),
        req("useYn", yes_no()),
    ];
    fields.extend(registrant_loose());
    Schema::new(fields)
}

fn branch_user() -> Schema {
    let mut fields = vec![
        req("userId", text()),
        req("userNm", text()),
        req("pwd", text()),
        req("useYn", yes_no()),
    ];
    fields.extend(registrant_loose());
    Schema::new(fields)
}

fn branch_insurance() -> Schema {
    let mut fields = vec![
        req("isrccCd", text()),
        req("isrccNm", text()),
        req("isrcRt", numeric_min(0.0)),
        req("useYn", yes_no()),
    ];
    fields.extend(registrant_loose());
    Schema::new(fields)
}

fn item() -> Schema {
    Schema::new(vec![
        req("itemCd", text()),
        req("itemClsCd", text()),
        req("itemTyCd", text()),
        req("itemNm", text()),
        opt("itemStdNm", vec![Check::String]),
        req("orgnNatCd", string_len(2, 5)),
        req("pkgUnitCd", text()),
        req("qtyUnitCd", text()),
        req("taxTyCd", text()),
        req("dftPrc", numeric_min(0.0)),
        opt("grpPrcL1", vec![Check::Numeric]),
        opt("grpPrcL2", vec![Check::Numeric]),
        opt("grpPrcL3", vec![Check::Numeric]),
        opt("grpPrcL4", vec![Check::Numeric]),
        opt("grpPrcL5", vec![Check::Numeric]),
        opt("btchNo", vec![Check::String]),
        opt("bcd", vec![Check::String]),
        opt("addInfo", vec![Check::String]),
        opt("sftyQty", vec![Check::Numeric]),
        req("isrcAplcbYn", yes_no()),
        req("useYn", yes_no()),
        req("regrId", text()),
        req("regrNm", text()),
        req("modrId", text()),
        req("modrNm", text()),
    ])
}

fn item_composition() -> Schema {
    let mut fields = vec![
        req("itemCd", text()),
        req("cpstItemCd", text()),
        req("cpstQty", numeric_min(0.001)),
    ];
    fields.extend(registrant_loose());
    Schema::new(fields)
}

fn receipt() -> Schema {
    Schema::new(vec![
        req("rcptPbctDt", timestamp()),
        req("prchrAcptcYn", yes_no()),
        opt("custTin", vec![Check::String, Check::exact_len(11)]),
        opt("custMblNo", string_max(20)),
        opt("trdeNm", string_max(20)),
        opt("adrs", string_max(200)),
        opt("topMsg", string_max(20)),
        opt("btmMsg", string_max(20)),
    ])
}

fn sales_item() -> Schema {
    Schema::new(vec![
        req("itemSeq", integer_min(1.0)),
        req("itemCd", text_max(20)),
        req("itemNm", text_max(200)),
        req("pkgUnitCd", text_max(5)),
        req("pkg", number()),
        req("qtyUnitCd", text_max(5)),
        req("qty", number()),
        req("prc", number()),
        req("splyAmt", number()),
        req("dcRt", number()),
        req("dcAmt", number()),
        req("taxTyCd", text_max(5)),
        req("taxblAmt", number()),
        req("taxAmt", number()),
        req("totAmt", number()),
        opt("itemClsCd", string_max(10)),
        opt("bcd", string_max(20)),
        opt("isrccCd", string_max(10)),
        opt("isrccNm", string_max(100)),
        opt("isrcRt", number()),
        opt("isrcAmt", number()),
    ])
}

fn sales_transaction() -> Schema {
    let mut fields = vec![
        req(
            "trdInvcNo",
            vec![Check::AnyOf(vec![string_max(50), vec![Check::Numeric]])],
        ),
        req("invcNo", integer_min(0.0)),
        req("orgInvcNo", integer_min(0.0)),
        opt("custTin", vec![Check::String, Check::exact_len(11)]),
        opt("custNm", string_max(60)),
        req("rcptTyCd", text_len(1, 5)),
        opt("pmtTyCd", string_len(1, 5)),
        req("salesSttsCd", text_len(1, 5)),
        req("cfmDt", timestamp()),
        req("salesDt", date()),
        opt("stockRlsDt", timestamp()),
        opt("cnclReqDt", timestamp()),
        opt("cnclDt", timestamp()),
        opt("rfdDt", timestamp()),
        opt("rfdRsnCd", string_len(1, 5)),
        req("totItemCnt", integer_min(1.0)),
    ];
    fields.extend(tax_bands());
    fields.push(req("prchrAcptcYn", yes_no()));
    fields.push(opt("remark", string_max(400)));
    fields.extend(registrant_strict());
    fields.push(req("receipt", vec![Check::Object(receipt())]));
    fields.push(req(
        "itemList",
        vec![Check::NonEmptyList, Check::ListOf(sales_item())],
    ));
    Schema::new(fields)
}

fn import_item_update() -> Schema {
    Schema::new(vec![
        req("taskCd", text()),
        req("dclDe", string_len(8, 14)),
        req("itemSeq", vec![Check::IntegerLike, Check::Min(1.0)]),
        req("hsCd", text_max(17)),
        req("itemClsCd", text_max(10)),
        req("itemCd", text_max(20)),
        req("imptItemSttsCd", text()),
        req("modrId", text()),
        req("modrNm", text()),
        opt("remark", vec![Check::String]),
    ])
}

fn stock_master() -> Schema {
    Schema::new(vec![
        req("itemCd", text_len(1, 20)),
        req("rsdQty", numeric_min(0.0)),
        req("regrId", text_len(1, 20)),
        req("regrNm", text_len(1, 60)),
        req("modrId", text_len(1, 20)),
        req("modrNm", text_len(1, 60)),
    ])
}

fn purchase_item() -> Schema {
    Schema::new(vec![
        req("itemSeq", integer_min(1.0)),
        req("itemCd", text_max(20)),
        req("itemClsCd", text_max(10)),
        req("itemNm", text_max(200)),
        opt("bcd", string_max(20)),
        opt("spplrItemClsCd", string_max(10)),
        opt("spplrItemCd", string_max(20)),
        opt("spplrItemNm", string_max(200)),
        req("pkgUnitCd", string_max(5)),
        req("pkg", number()),
        req("qtyUnitCd", string_max(5)),
        req("qty", number()),
        req("prc", number()),
        req("splyAmt", number()),
        req("dcRt", number()),
        req("dcAmt", number()),
        req("taxblAmt", number()),
        req("taxTyCd", string_max(5)),
        req("taxAmt", number()),
        req("totAmt", number()),
        opt("itemExprDt", string_len(8, 14)),
    ])
}

fn purchase() -> Schema {
    let mut fields = vec![
        opt("spplrTin", vec![Check::String, Check::exact_len(11)]),
        req("invcNo", integer_min(0.0)),
        req("orgInvcNo", integer_min(0.0)),
        opt("spplrBhfId", vec![Check::String, Check::exact_len(2)]),
        opt("spplrNm", string_max(60)),
        opt("spplrInvcNo", integer_min(0.0)),
        req("regTyCd", text_len(1, 5)),
        req("pchsTyCd", text_len(1, 5)),
        req("rcptTyCd", text_len(1, 5)),
        req("pmtTyCd", text_len(1, 5)),
        req("pchsSttsCd", text_len(1, 5)),
        opt("cfmDt", string_len(8, 14)),
        opt("wrhsDt", string_len(8, 14)),
        opt("cnclReqDt", string_len(8, 14)),
        opt("cnclDt", string_len(8, 14)),
        opt("rfdDt", string_len(8, 14)),
        opt("pchsDt", string_len(8, 14)),
        req("totItemCnt", integer_min(0.0)),
    ];
    fields.extend(tax_bands());
    fields.push(opt("remark", string_max(400)));
    fields.extend(registrant_strict());
    fields.push(req("itemList", vec![Check::ListOf(purchase_item())]));
    Schema::new(fields)
}

fn stock_movement_item() -> Schema {
    Schema::new(vec![
        req("itemSeq", integer_min(1.0)),
        req("itemCd", text_max(20)),
        req("itemClsCd", text_max(10)),
        req("itemNm", text_max(200)),
        opt("bcd", string_max(20)),
        req("pkgUnitCd", string_max(5)),
        req("pkg", number()),
        req("qtyUnitCd", string_max(5)),
        req("qty", number()),
        opt("itemExprDt", vec![Check::String, Check::exact_len(8)]),
        req("prc", number()),
        req("splyAmt", number()),
        req("totDcAmt", number()),
        req("taxblAmt", number()),
        req("taxTyCd", string_max(5)),
        req("taxAmt", number()),
        req("totAmt", number()),
    ])
}

fn stock_movement() -> Schema {
    let mut fields = vec![
        req("tin", vec![Check::String, Check::NotEmpty, Check::exact_len(11)]),
        req("bhfId", vec![Check::String, Check::NotEmpty, Check::exact_len(2)]),
        req("sarNo", integer_min(0.0)),
        req("orgSarNo", integer_min(0.0)),
        req("regTyCd", text_len(1, 5)),
        opt("custTin", vec![Check::String, Check::exact_len(11)]),
        opt("custNm", string_max(100)),
        opt("custBhfId", vec![Check::String, Check::exact_len(2)]),
        req("sarTyCd", text_len(1, 5)),
        req("ocrnDt", vec![Check::String, Check::exact_len(8)]),
        req("totItemCnt", integer_min(0.0)),
        req("totTaxblAmt", number()),
        req("totTaxAmt", number()),
        req("totAmt", number()),
        opt("remark", string_max(400)),
    ];
    fields.extend(registrant_strict());
    fields.push(req("itemList", vec![Check::ListOf(stock_movement_item())]));
    Schema::new(fields)
}

// ── Lookup ────────────────────────────────────────────────────────────────────

macro_rules! cached {
    ($build:ident) => {{
        static SCHEMA: LazyLock<Schema> = LazyLock::new($build);
        &SCHEMA
    }};
}

/// The rule set for `name`. Built once per process.
#[must_use]
pub fn schema_for(name: SchemaName) -> &'static Schema {
    match name {
        SchemaName::Initialization => cached!(initialization),
        SchemaName::LastRequestOnly => cached!(last_request_only),
        SchemaName::SelectCustomer => cached!(select_customer),
        SchemaName::BranchCustomer => cached!(branch_customer),
        SchemaName::BranchUser => cached!(branch_user),
        SchemaName::BranchInsurance => cached!(branch_insurance),
        SchemaName::Item => cached!(item),
        SchemaName::ItemComposition => cached!(item_composition),
        SchemaName::SalesTransaction => cached!(sales_transaction),
        SchemaName::ImportItemUpdate => cached!(import_item_update),
        SchemaName::StockMaster => cached!(stock_master),
        SchemaName::Purchase => cached!(purchase),
        SchemaName::StockMovement => cached!(stock_movement),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_schema_has_fields() {
        for name in SchemaName::all() {
            assert!(!schema_for(*name).fields().is_empty(), "{name} is empty");
        }
    }

    #[test]
    fn test_sales_transaction_shape() {
        let s = schema_for(SchemaName::SalesTransaction);
        assert!(matches!(
            s.field("receipt").unwrap().checks[0],
            Check::Object(_)
        ));
        let items = &s.field("itemList").unwrap().checks;
        assert!(matches!(items[0], Check::NonEmptyList));
        assert!(matches!(items[1], Check::ListOf(_)));
        assert!(s.field("taxAmtE").is_some_and(|f| f.required));
        assert!(s.field("remark").is_some_and(|f| !f.required));
    }

    #[test]
    fn test_item_requires_modifier() {
        let s = schema_for(SchemaName::Item);
        assert!(s.field("modrId").is_some_and(|f| f.required));
        let c = schema_for(SchemaName::ItemComposition);
        assert!(c.field("modrId").is_some_and(|f| !f.required));
    }

    #[test]
    fn test_patterns_compile() {
        assert!(DIGITS_14.is_match("20240101120000"));
        assert!(!DIGITS_14.is_match("2024010112000"));
        assert!(DIGITS_8.is_match("20240101"));
    }

    #[test]
    fn test_schema_is_cached() {
        assert!(std::ptr::eq(
            schema_for(SchemaName::Purchase),
            schema_for(SchemaName::Purchase)
        ));
    }
}
