//! Walks a JSON payload against a schema and collects every violation.

use crate::name::SchemaName;
use crate::rule::{Check, FieldRule, Schema};
use crate::schemas::schema_for;
use etims_types::{EtimsError, Result, ValidationErrors};
use serde_json::{Map, Value};

/// Path reported when the payload itself is not a JSON object.
pub const ROOT_PATH: &str = "$";

/// Stateless validator over the built-in schema tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validates `data` against `schema`, returning it unchanged on success.
    ///
    /// # Errors
    ///
    /// Returns [`EtimsError::Validation`] listing every rejected field.
    pub fn validate(&self, data: Value, schema: SchemaName) -> Result<Value> {
        let errors = self.check(&data, schema_for(schema));
        if errors.is_empty() {
            Ok(data)
        } else {
            Err(EtimsError::Validation(errors))
        }
    }

    /// Like [`validate`](Self::validate), looking the schema up by its key.
    ///
    /// # Errors
    ///
    /// Returns [`EtimsError::Config`] for an unknown schema key, otherwise as
    /// [`validate`](Self::validate).
    pub fn validate_named(&self, data: Value, schema: &str) -> Result<Value> {
        self.validate(data, schema.parse()?)
    }

    /// Collects violations of an arbitrary schema without consuming the payload.
    #[must_use]
    pub fn check(&self, data: &Value, schema: &Schema) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        match data.as_object() {
            Some(obj) => check_object(schema, obj, "", &mut errors),
            None => errors.add(ROOT_PATH, "must be an object"),
        }
        errors
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn check_object(schema: &Schema, obj: &Map<String, Value>, prefix: &str, errors: &mut ValidationErrors) {
    for field in schema.fields() {
        let path = join(prefix, field.name);
        check_field(field, obj.get(field.name), &path, errors);
    }
}

fn check_field(rule: &FieldRule, value: Option<&Value>, path: &str, errors: &mut ValidationErrors) {
    match value {
        None | Some(Value::Null) if rule.required => errors.add(path, "is required"),
        None | Some(Value::Null) => {}
        Some(v) => run_chain(&rule.checks, v, path, errors),
    }
}

/// Runs checks in order, stopping at the first one that reports a violation.
fn run_chain(checks: &[Check], value: &Value, path: &str, errors: &mut ValidationErrors) {
    for check in checks {
        let before = errors.len();
        match check {
            Check::Object(schema) => match value.as_object() {
                Some(obj) => check_object(schema, obj, path, errors),
                None => errors.add(path, "must be an object"),
            },
            Check::ListOf(schema) => match value.as_array() {
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        let item_path = format!("{path}[{i}]");
                        match item.as_object() {
                            Some(obj) => check_object(schema, obj, &item_path, errors),
                            None => errors.add(item_path, "must be an object"),
                        }
                    }
                }
                None => errors.add(path, "must be a list"),
            },
            Check::AnyOf(chains) => {
                if let Err(msg) = any_of(chains, value, path) {
                    errors.add(path, msg);
                }
            }
            scalar => {
                if let Err(msg) = check_scalar(scalar, value) {
                    errors.add(path, msg);
                }
            }
        }
        if errors.len() > before {
            return;
        }
    }
}

fn any_of(chains: &[Vec<Check>], value: &Value, path: &str) -> std::result::Result<(), String> {
    let mut reasons = Vec::with_capacity(chains.len());
    for chain in chains {
        let mut scratch = ValidationErrors::new();
        run_chain(chain, value, path, &mut scratch);
        if scratch.is_empty() {
            return Ok(());
        }
        reasons.push(
            scratch
                .get(path)
                .unwrap_or("has invalid nested fields")
                .to_string(),
        );
    }
    Err(reasons.join(", or "))
}

fn check_scalar(check: &Check, value: &Value) -> std::result::Result<(), String> {
    match check {
        Check::String => value
            .is_string()
            .then_some(())
            .ok_or_else(|| "must be a string".to_string()),
        Check::NotEmpty => match value {
            Value::String(s) if s.trim().is_empty() => Err("must not be empty".into()),
            Value::Array(a) if a.is_empty() => Err("must not be empty".into()),
            _ => Ok(()),
        },
        Check::Length { min, max } => {
            let Some(s) = value.as_str() else {
                return Err("must be a string".into());
            };
            check_length(s.chars().count(), *min, *max)
        }
        Check::Pattern { regex, format } => match value.as_str() {
            Some(s) if regex.is_match(s) => Ok(()),
            _ => Err(format!("must be formatted as {format}")),
        },
        Check::OneOf(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => Ok(()),
            _ => Err(format!("must be one of {}", allowed.join(", "))),
        },
        Check::Number => value
            .is_number()
            .then_some(())
            .ok_or_else(|| "must be a number".to_string()),
        Check::Numeric => numeric(value)
            .map(|_| ())
            .ok_or_else(|| "must be numeric".to_string()),
        Check::Integer => (value.is_i64() || value.is_u64())
            .then_some(())
            .ok_or_else(|| "must be an integer".to_string()),
        Check::IntegerLike => (value.is_i64() || value.is_u64() || value.as_str().is_some_and(is_integer_str))
            .then_some(())
            .ok_or_else(|| "must be an integer".to_string()),
        Check::Min(bound) => match numeric(value) {
            Some(n) if n >= *bound => Ok(()),
            Some(_) => Err(format!("must be greater than or equal to {bound}")),
            None => Err("must be numeric".into()),
        },
        Check::Max(bound) => match numeric(value) {
            Some(n) if n <= *bound => Ok(()),
            Some(_) => Err(format!("must be less than or equal to {bound}")),
            None => Err("must be numeric".into()),
        },
        Check::NonEmptyList => match value.as_array() {
            Some(a) if a.is_empty() => Err("must contain at least one entry".into()),
            Some(_) => Ok(()),
            None => Err("must be a list".into()),
        },
        Check::Object(_) | Check::ListOf(_) | Check::AnyOf(_) => Ok(()),
    }
}

fn check_length(len: usize, min: Option<usize>, max: Option<usize>) -> std::result::Result<(), String> {
    match (min, max) {
        (Some(lo), Some(hi)) if lo == hi && len != lo => Err(format!("must be exactly {lo} characters")),
        (Some(lo), _) if len < lo => Err(format!("must be at least {lo} characters")),
        (_, Some(hi)) if len > hi => Err(format!("must be at most {hi} characters")),
        _ => Ok(()),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn is_integer_str(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item() -> Value {
        json!({
            "itemCd": "KE1NTXU0000001",
            "itemClsCd": "5059690800",
            "itemTyCd": "1",
            "itemNm": "Test Material",
            "orgnNatCd": "KE",
            "pkgUnitCd": "NT",
            "qtyUnitCd": "U",
            "taxTyCd": "B",
            "dftPrc": 3500,
            "isrcAplcbYn": "N",
            "useYn": "Y",
            "regrId": "admin",
            "regrNm": "Admin",
            "modrId": "admin",
            "modrNm": "Admin"
        })
    }

    fn sales_item(seq: i64) -> Value {
        json!({
            "itemSeq": seq,
            "itemCd": "KE1NTXU0000001",
            "itemNm": "Test Material",
            "pkgUnitCd": "NT",
            "pkg": 1,
            "qtyUnitCd": "U",
            "qty": 1,
            "prc": 100.0,
            "splyAmt": 100.0,
            "dcRt": 0,
            "dcAmt": 0,
            "taxTyCd": "B",
            "taxblAmt": 86.21,
            "taxAmt": 13.79,
            "totAmt": 100.0
        })
    }

    fn sales() -> Value {
        let mut v = json!({
            "trdInvcNo": "INV-001",
            "invcNo": 1,
            "orgInvcNo": 0,
            "rcptTyCd": "S",
            "pmtTyCd": "01",
            "salesSttsCd": "02",
            "cfmDt": "20240101120000",
            "salesDt": "20240101",
            "totItemCnt": 1,
            "prchrAcptcYn": "N",
            "regrId": "admin",
            "regrNm": "Admin",
            "modrId": "admin",
            "modrNm": "Admin",
            "receipt": {"rcptPbctDt": "20240101120000", "prchrAcptcYn": "N"},
            "itemList": [sales_item(1)]
        });
        let obj = v.as_object_mut().unwrap();
        for f in [
            "taxblAmtA", "taxblAmtB", "taxblAmtC", "taxblAmtD", "taxblAmtE", "taxRtA", "taxRtB",
            "taxRtC", "taxRtD", "taxRtE", "taxAmtA", "taxAmtB", "taxAmtC", "taxAmtD", "taxAmtE",
            "totTaxblAmt", "totTaxAmt", "totAmt",
        ] {
            obj.insert(f.to_string(), json!(0));
        }
        v
    }

    fn violations(result: Result<Value>) -> ValidationErrors {
        match result {
            Err(EtimsError::Validation(e)) => e,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_payload_returned_unchanged() {
        let v = Validator::new();
        let data = item();
        assert_eq!(v.validate(data.clone(), SchemaName::Item).unwrap(), data);
        let s = sales();
        assert_eq!(v.validate(s.clone(), SchemaName::SalesTransaction).unwrap(), s);
    }

    #[test]
    fn test_negative_default_price_rejected() {
        let mut data = item();
        data["dftPrc"] = json!(-1);
        let errs = violations(Validator::new().validate(data, SchemaName::Item));
        assert_eq!(errs.len(), 1);
        assert_eq!(errs.get("dftPrc"), Some("must be greater than or equal to 0"));
    }

    #[test]
    fn test_every_violation_reported() {
        let mut data = item();
        let obj = data.as_object_mut().unwrap();
        obj.remove("itemCd");
        obj.insert("useYn".into(), json!("X"));
        obj.insert("orgnNatCd".into(), json!("K"));
        obj.insert("dftPrc".into(), json!("abc"));
        let errs = violations(Validator::new().validate(data, SchemaName::Item));
        assert_eq!(errs.len(), 4);
        assert_eq!(errs.get("itemCd"), Some("is required"));
        assert_eq!(errs.get("useYn"), Some("must be one of Y, N"));
        assert_eq!(errs.get("orgnNatCd"), Some("must be at least 2 characters"));
        assert_eq!(errs.get("dftPrc"), Some("must be numeric"));
    }

    #[test]
    fn test_numeric_string_accepted_for_numeric_fields() {
        let mut data = item();
        data["dftPrc"] = json!("3500.50");
        data["grpPrcL1"] = json!(3000);
        assert!(Validator::new().validate(data, SchemaName::Item).is_ok());
    }

    #[test]
    fn test_null_optional_fields_skipped() {
        let mut data = item();
        data["itemStdNm"] = Value::Null;
        data["bcd"] = Value::Null;
        data["grpPrcL2"] = Value::Null;
        assert!(Validator::new().validate(data, SchemaName::Item).is_ok());
    }

    #[test]
    fn test_null_required_field_rejected() {
        let mut data = item();
        data["itemNm"] = Value::Null;
        let errs = violations(Validator::new().validate(data, SchemaName::Item));
        assert_eq!(errs.get("itemNm"), Some("is required"));
    }

    #[test]
    fn test_blank_string_is_empty() {
        let mut data = item();
        data["itemNm"] = json!("   ");
        let errs = violations(Validator::new().validate(data, SchemaName::Item));
        assert_eq!(errs.get("itemNm"), Some("must not be empty"));
    }

    #[test]
    fn test_nested_list_paths_indexed() {
        let mut data = sales();
        let mut bad = sales_item(3);
        bad["qty"] = json!("1");
        bad.as_object_mut().unwrap().remove("itemNm");
        data["itemList"] = json!([sales_item(1), sales_item(2), bad]);
        data["receipt"]["custTin"] = json!("P05");
        let errs = violations(Validator::new().validate(data, SchemaName::SalesTransaction));
        assert_eq!(errs.len(), 3);
        assert_eq!(errs.get("itemList[2].qty"), Some("must be a number"));
        assert_eq!(errs.get("itemList[2].itemNm"), Some("is required"));
        assert_eq!(errs.get("receipt.custTin"), Some("must be exactly 11 characters"));
    }

    #[test]
    fn test_empty_sales_item_list_rejected() {
        let mut data = sales();
        data["itemList"] = json!([]);
        let errs = violations(Validator::new().validate(data, SchemaName::SalesTransaction));
        assert_eq!(errs.get("itemList"), Some("must contain at least one entry"));
    }

    #[test]
    fn test_list_element_must_be_object() {
        let mut data = sales();
        data["itemList"] = json!([sales_item(1), "oops"]);
        let errs = violations(Validator::new().validate(data, SchemaName::SalesTransaction));
        assert_eq!(errs.get("itemList[1]"), Some("must be an object"));
    }

    #[test]
    fn test_trade_invoice_number_alternatives() {
        let v = Validator::new();
        let mut data = sales();
        data["trdInvcNo"] = json!(1001);
        assert!(v.validate(data.clone(), SchemaName::SalesTransaction).is_ok());

        data["trdInvcNo"] = json!("X".repeat(51));
        let errs = violations(v.validate(data, SchemaName::SalesTransaction));
        assert_eq!(
            errs.get("trdInvcNo"),
            Some("must be at most 50 characters, or must be numeric")
        );
    }

    #[test]
    fn test_timestamp_format() {
        let v = Validator::new();
        assert!(v
            .validate(json!({"lastReqDt": "20240101000000"}), SchemaName::LastRequestOnly)
            .is_ok());
        let errs = violations(
            v.validate(json!({"lastReqDt": "2024-01-01"}), SchemaName::LastRequestOnly),
        );
        assert_eq!(errs.get("lastReqDt"), Some("must be formatted as yyyyMMddHHmmss"));
    }

    #[test]
    fn test_integer_fields_reject_floats() {
        let mut data = sales();
        data["invcNo"] = json!(1.5);
        data["totItemCnt"] = json!(0);
        let errs = violations(Validator::new().validate(data, SchemaName::SalesTransaction));
        assert_eq!(errs.get("invcNo"), Some("must be an integer"));
        assert_eq!(errs.get("totItemCnt"), Some("must be greater than or equal to 1"));
    }

    #[test]
    fn test_integer_like_accepts_digit_string() {
        let data = json!({
            "taskCd": "2231943",
            "dclDe": "20191217",
            "itemSeq": "1",
            "hsCd": "1231531231",
            "itemClsCd": "5022110801",
            "itemCd": "KE1NTXU0000001",
            "imptItemSttsCd": "1",
            "modrId": "admin",
            "modrNm": "Admin"
        });
        let v = Validator::new();
        assert!(v.validate(data.clone(), SchemaName::ImportItemUpdate).is_ok());

        let mut bad = data;
        bad["itemSeq"] = json!("0");
        let errs = violations(v.validate(bad, SchemaName::ImportItemUpdate));
        assert_eq!(errs.get("itemSeq"), Some("must be greater than or equal to 1"));
    }

    #[test]
    fn test_composition_quantity_lower_bound() {
        let data = json!({
            "itemCd": "KE1NTXU0000001",
            "cpstItemCd": "KE1NTXU0000002",
            "cpstQty": 0.0005,
            "regrId": "admin",
            "regrNm": "Admin"
        });
        let errs = violations(Validator::new().validate(data, SchemaName::ItemComposition));
        assert_eq!(errs.get("cpstQty"), Some("must be greater than or equal to 0.001"));
    }

    #[test]
    fn test_length_counts_characters() {
        let data = json!({"custmTin": "ñ".repeat(20)});
        assert!(Validator::new().validate(data, SchemaName::SelectCustomer).is_ok());
    }

    #[test]
    fn test_non_object_payload() {
        let errs = violations(Validator::new().validate(json!([1, 2]), SchemaName::Initialization));
        assert_eq!(errs.get(ROOT_PATH), Some("must be an object"));
    }

    #[test]
    fn test_validate_named_unknown_schema() {
        let err = Validator::new()
            .validate_named(json!({}), "noSuchSchema")
            .unwrap_err();
        assert!(matches!(err, EtimsError::Config(_)));
    }

    #[test]
    fn test_validate_named_known_schema() {
        let data = json!({"tin": "P051234567A", "bhfId": "00", "dvcSrlNo": "dvc-001"});
        assert!(Validator::new()
            .validate_named(data, "initialization")
            .is_ok());
    }
}
