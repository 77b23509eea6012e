//! The normalization core: turns the parser's raw mapping into the canonical
//! [`FinancialVariables`] collection.
//!
//! Two incompatible response shapes coexist in the wild, because upstream
//! model versions disagree on format. The legacy shape maps a key directly to
//! a scalar; the structured shape maps a key to an object carrying a `values`
//! array with per-observation type and year. Both are reconciled here into
//! one collection, and every per-entry failure is a local skip: no error
//! ever escapes [`resolve`].

use log::debug;
use serde_json::{Map, Value};

use crate::catalog::Catalog;
use crate::variables::{FinancialValue, FinancialVariable, FinancialVariables, ValueType};

/// Per-key classification of a top-level entry. An entry is structured iff
/// it is a mapping containing a `values` key whose value is a sequence;
/// everything else is treated as a legacy scalar.
enum ResponseEntry<'a> {
    Legacy(&'a Value),
    Structured(&'a Map<String, Value>),
}

fn classify(value: &Value) -> ResponseEntry<'_> {
    if let Value::Object(object) = value {
        if object.get("values").map(Value::is_array).unwrap_or(false) {
            return ResponseEntry::Structured(object);
        }
    }
    ResponseEntry::Legacy(value)
}

/// Lossy-safe numeric coercion: accepts JSON numbers and numeric strings,
/// rejects everything else (including non-finite results).
fn coerce_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    amount.is_finite().then_some(amount)
}

/// Resolves the parsed model output against the catalog.
///
/// The legacy pass runs first over every non-structured entry, then the
/// structured pass runs over the rest, feeding the same destination: if the
/// model mixed formats, one canonical name may accumulate values from both
/// passes. Nothing is deduplicated. Variables that end up with zero valid
/// observations are pruned.
pub fn resolve(parsed: &Map<String, Value>, catalog: &Catalog) -> FinancialVariables {
    let mut variables = FinancialVariables::new();

    for (key, value) in parsed {
        if let ResponseEntry::Legacy(scalar) = classify(value) {
            resolve_legacy(key, scalar, catalog, &mut variables);
        }
    }

    for (key, value) in parsed {
        if let ResponseEntry::Structured(object) = classify(value) {
            resolve_structured(key, object, catalog, &mut variables);
        }
    }

    variables.prune_empty();
    variables
}

/// Legacy flat entries: `alias_or_name -> scalar`. The key goes through
/// alias resolution, falling back to the raw key verbatim; the value gets
/// `Unspecified` type and no fiscal year.
fn resolve_legacy(key: &str, value: &Value, catalog: &Catalog, out: &mut FinancialVariables) {
    if value.is_null() {
        return;
    }

    let Some(amount) = coerce_amount(value) else {
        debug!("Skipping non-numeric value for '{}': {}", key, value);
        return;
    };

    let name = catalog.resolve_name(key).unwrap_or(key).to_string();
    let variable = out.or_create(&name);
    inherit_catalog_info(variable, catalog);
    variable
        .values
        .push(FinancialValue::new(amount, ValueType::Unspecified, None));
}

/// Structured entries: the key is already a canonical identifier, so no
/// alias resolution is applied. Each observation is coerced independently;
/// a bad observation drops that entry alone, not the whole variable.
fn resolve_structured(
    key: &str,
    object: &Map<String, Value>,
    catalog: &Catalog,
    out: &mut FinancialVariables,
) {
    let variable = out.or_create(key);

    if let Some(code) = object.get("code").and_then(Value::as_str) {
        variable.accounting_code = Some(code.to_string());
    }
    if let Some(description) = object.get("description").and_then(Value::as_str) {
        variable.description = Some(description.to_string());
    }
    inherit_catalog_info(variable, catalog);

    let Some(entries) = object.get("values").and_then(Value::as_array) else {
        return;
    };

    for entry in entries {
        let Some(entry) = entry.as_object() else {
            debug!("Skipping malformed observation for '{}': {}", key, entry);
            continue;
        };

        let Some(amount) = entry.get("value").and_then(coerce_amount) else {
            debug!("Skipping non-numeric observation for '{}'", key);
            continue;
        };

        let value_type = entry
            .get("value_type")
            .and_then(Value::as_str)
            .map(ValueType::parse)
            .unwrap_or_default();

        let fiscal_year = entry
            .get("year")
            .and_then(Value::as_i64)
            .map(|year| year as i32);

        variable
            .values
            .push(FinancialValue::new(amount, value_type, fiscal_year));
    }
}

fn inherit_catalog_info(variable: &mut FinancialVariable, catalog: &Catalog) {
    if let Some(info) = catalog.info(&variable.name) {
        if variable.accounting_code.is_none() {
            variable.accounting_code = info.code.clone();
        }
        if variable.description.is_none() {
            variable.description = info.description.clone();
        }
    }
}
