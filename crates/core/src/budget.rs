use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::models::{BudgetEstimate, BudgetLine};

pub const DEFAULT_BASIS: &str = "Synthesized estimate";
pub const DEFAULT_CURRENCY: &str = "INR";

static FENCED_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("valid fenced-block pattern"));

#[derive(Debug, Error)]
pub enum BudgetParseError {
    #[error("budget block is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("budget block is not a JSON object")]
    NotAnObject,
    #[error("budget bounds are missing or non-numeric")]
    InvalidBounds,
}

pub fn extract_fenced_json(text: &str) -> Option<&str> {
    FENCED_JSON
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|block| block.as_str())
}

pub fn parse_budget(raw: &str) -> Result<BudgetEstimate, BudgetParseError> {
    let value: Value = serde_json::from_str(raw)?;
    let object = value.as_object().ok_or(BudgetParseError::NotAnObject)?;

    let low = object
        .get("low")
        .and_then(Value::as_f64)
        .ok_or(BudgetParseError::InvalidBounds)?;
    let high = object
        .get("high")
        .and_then(Value::as_f64)
        .ok_or(BudgetParseError::InvalidBounds)?;

    let currency = non_empty_str(object.get("currency"))
        .unwrap_or(DEFAULT_CURRENCY)
        .to_string();
    let basis = non_empty_str(object.get("basis"))
        .unwrap_or(DEFAULT_BASIS)
        .to_string();
    let categories = object
        .get("categories")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(budget_line).collect())
        .unwrap_or_default();

    Ok(BudgetEstimate {
        low,
        high,
        currency,
        basis,
        categories,
    })
}

pub fn extract_budget(text: &str) -> Option<BudgetEstimate> {
    let raw = extract_fenced_json(text)?;
    parse_budget(raw).ok()
}

fn budget_line(entry: &Value) -> BudgetLine {
    BudgetLine {
        label: non_empty_str(entry.get("label"))
            .unwrap_or("Category")
            .to_string(),
        amount: entry.get("amount").and_then(Value::as_f64).unwrap_or(0.0),
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fenced_budget_block() {
        let text = "Here is your plan.\n```json\n{\"low\":2000,\"high\":5000,\"currency\":\"INR\",\"categories\":[]}\n```\n- Visit Victoria Memorial";
        let budget = extract_budget(text).expect("budget present");
        assert_eq!(budget.low, 2000.0);
        assert_eq!(budget.high, 5000.0);
        assert_eq!(budget.currency, "INR");
        assert_eq!(budget.basis, DEFAULT_BASIS);
        assert!(budget.categories.is_empty());
    }

    #[test]
    fn missing_block_yields_none() {
        assert!(extract_budget("no structured data here").is_none());
        assert!(extract_fenced_json("```\n{}\n```").is_none());
    }

    #[test]
    fn non_numeric_bounds_are_rejected() {
        let raw = "{\"low\":\"cheap\",\"high\":5000}";
        assert!(matches!(
            parse_budget(raw),
            Err(BudgetParseError::InvalidBounds)
        ));
        assert!(extract_budget(&format!("```json\n{raw}\n```")).is_none());
    }

    #[test]
    fn malformed_json_is_a_typed_error() {
        assert!(matches!(
            parse_budget("{not json"),
            Err(BudgetParseError::Malformed(_))
        ));
    }

    #[test]
    fn category_defaults_are_applied() {
        let raw = "{\"low\":1000,\"high\":2000,\"categories\":[{\"label\":\"Food\",\"amount\":600},{\"percent\":20}]}";
        let budget = parse_budget(raw).expect("valid budget");
        assert_eq!(budget.categories.len(), 2);
        assert_eq!(budget.categories[0].label, "Food");
        assert_eq!(budget.categories[0].amount, 600.0);
        assert_eq!(budget.categories[1].label, "Category");
        assert_eq!(budget.categories[1].amount, 0.0);
    }
}
