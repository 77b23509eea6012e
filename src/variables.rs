use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accounting nature of a monetary figure as it appears in a French
/// balance sheet column (brut / amortissement / net).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub enum ValueType {
    #[serde(rename = "brut")]
    #[schemars(description = "Gross amount, before depreciation and provisions")]
    Gross,

    #[serde(rename = "amortissement")]
    #[schemars(description = "Accumulated depreciation or provision amount")]
    Depreciation,

    #[serde(rename = "net")]
    #[schemars(description = "Net amount, after depreciation and provisions")]
    Net,

    #[serde(rename = "unspecified")]
    #[schemars(description = "The statement does not disambiguate the column")]
    Unspecified,
}

impl Default for ValueType {
    fn default() -> Self {
        Self::Unspecified
    }
}

impl ValueType {
    /// Decodes a value-type token from untrusted model output. Total:
    /// unknown tokens map to `Unspecified` instead of failing.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "brut" => Self::Gross,
            "amortissement" => Self::Depreciation,
            "net" => Self::Net,
            _ => Self::Unspecified,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gross => "brut",
            Self::Depreciation => "amortissement",
            Self::Net => "net",
            Self::Unspecified => "unspecified",
        }
    }
}

/// One scalar observation of a financial variable. `amount` is always
/// finite: non-coercible values never survive resolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct FinancialValue {
    #[serde(rename = "value")]
    #[schemars(description = "The monetary amount")]
    pub amount: f64,

    #[serde(default)]
    #[schemars(description = "Which statement column the amount was read from")]
    pub value_type: ValueType,

    #[serde(rename = "year", default)]
    #[schemars(description = "The fiscal year the amount pertains to, null when unspecified")]
    pub fiscal_year: Option<i32>,
}

impl FinancialValue {
    pub fn new(amount: f64, value_type: ValueType, fiscal_year: Option<i32>) -> Self {
        Self {
            amount,
            value_type,
            fiscal_year,
        }
    }
}

/// One named financial quantity with its dated/typed observations.
///
/// `values` keeps insertion order from resolution and is never empty in a
/// final collection (empty variables are pruned). Duplicate (type, year)
/// pairs are retained as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct FinancialVariable {
    #[schemars(description = "Canonical variable name")]
    pub name: String,

    pub values: Vec<FinancialValue>,

    #[serde(rename = "code", default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Accounting code from the chart of accounts, if known")]
    pub accounting_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FinancialVariable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            accounting_code: None,
            description: None,
        }
    }
}

/// The canonical collection produced by one extraction run. Keys are
/// canonical variable names; iteration order is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FinancialVariables(BTreeMap<String, FinancialVariable>);

impl FinancialVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FinancialVariable> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FinancialVariable)> {
        self.0.iter()
    }

    /// Returns the variable for `name`, creating an empty one on first use.
    pub fn or_create(&mut self, name: &str) -> &mut FinancialVariable {
        self.0
            .entry(name.to_string())
            .or_insert_with(|| FinancialVariable::new(name))
    }

    /// Drops every variable with zero valid observations. A variable with
    /// no values is indistinguishable from "not found".
    pub fn prune_empty(&mut self) {
        self.0.retain(|_, var| !var.values.is_empty());
    }

    /// Renders the stable output shape consumed by downstream tooling:
    /// one key per variable, `code`/`description` only when present.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
