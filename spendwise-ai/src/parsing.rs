//! Parse model replies into predictions.
//!
//! Models often wrap JSON in prose or code fences, so the first `{`/`[` to the
//! last `}`/`]` is taken as the payload. Any shape problem is a
//! `MalformedResponse`.

use serde::Deserialize;
use spendwise_core::Category;

use crate::error::{PredictionError, Result};
use crate::prediction::Prediction;

#[derive(Debug, Deserialize)]
struct RawPrediction {
    #[serde(default)]
    description: Option<String>,
    amount: f64,
    category: String,
    confidence: f64,
}

impl RawPrediction {
    fn validate(self, description: String) -> Result<Prediction> {
        let category = self
            .category
            .parse::<Category>()
            .map_err(|e| PredictionError::MalformedResponse(e.to_string()))?;
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(PredictionError::MalformedResponse(format!(
                "amount out of range: {}",
                self.amount
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(PredictionError::MalformedResponse(format!(
                "confidence out of range: {}",
                self.confidence
            )));
        }
        Ok(Prediction {
            description,
            amount: self.amount,
            category,
            confidence: self.confidence,
        })
    }
}

/// Parse a single prediction. The returned description is always `input`.
pub fn parse_prediction(response: &str, input: &str) -> Result<Prediction> {
    let json = extract_delimited(response, '{', '}')?;
    let raw: RawPrediction = serde_json::from_str(json).map_err(|e| invalid_json(e, json))?;
    raw.validate(input.to_string())
}

/// Parse a JSON array of suggestions. One bad entry rejects the whole reply.
pub fn parse_suggestions(response: &str) -> Result<Vec<Prediction>> {
    let json = extract_delimited(response, '[', ']')?;
    let raw: Vec<RawPrediction> = serde_json::from_str(json).map_err(|e| invalid_json(e, json))?;
    raw.into_iter()
        .map(|r| {
            let description = r
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .ok_or_else(|| {
                    PredictionError::MalformedResponse("suggestion without description".into())
                })?;
            r.validate(description)
        })
        .collect()
}

/// Parse a bare category name such as `Food`, `"Bills".` or `category: Transport`.
pub fn parse_category(response: &str) -> Result<Category> {
    let cleaned = response
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`' || c == '.' || c.is_whitespace());
    let name = cleaned.rsplit(':').next().unwrap_or(cleaned);
    name.trim()
        .parse::<Category>()
        .map_err(|e| PredictionError::MalformedResponse(e.to_string()))
}

fn extract_delimited(response: &str, open: char, close: char) -> Result<&str> {
    let response = response.trim();
    match (response.find(open), response.rfind(close)) {
        (Some(s), Some(e)) if s < e => Ok(&response[s..=e]),
        _ => Err(PredictionError::MalformedResponse(format!(
            "no JSON found in reply | Raw: {}",
            truncate(response)
        ))),
    }
}

fn invalid_json(e: serde_json::Error, json: &str) -> PredictionError {
    PredictionError::MalformedResponse(format!("invalid JSON: {e} | Raw: {}", truncate(json)))
}

fn truncate(s: &str) -> String {
    match s.char_indices().nth(200) {
        Some((i, _)) => format!("{}...", &s[..i]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prediction() {
        let p = parse_prediction(
            r#"{"description":"lunch","amount":12.5,"category":"Food","confidence":0.9}"#,
            "lunch with team",
        )
        .unwrap();
        assert_eq!(p.amount, 12.5);
        assert_eq!(p.category, Category::Food);
        assert_eq!(p.confidence, 0.9);
        assert_eq!(p.description, "lunch with team");
    }

    #[test]
    fn test_parse_prediction_in_code_fence() {
        let reply = "```json\n{\"amount\": 40, \"category\": \"transport\", \"confidence\": 0.75}\n```";
        let p = parse_prediction(reply, "gas").unwrap();
        assert_eq!(p.category, Category::Transport);
        assert_eq!(p.amount, 40.0);
    }

    #[test]
    fn test_unknown_category_is_malformed() {
        let err = parse_prediction(
            r#"{"amount":3,"category":"Groceries","confidence":0.8}"#,
            "x",
        )
        .unwrap_err();
        assert!(matches!(err, PredictionError::MalformedResponse(_)));
    }

    #[test]
    fn test_out_of_range_values_are_malformed() {
        assert!(parse_prediction(r#"{"amount":3,"category":"Food","confidence":1.5}"#, "x").is_err());
        assert!(parse_prediction(r#"{"amount":-3,"category":"Food","confidence":0.5}"#, "x").is_err());
    }

    #[test]
    fn test_not_json_is_malformed() {
        assert!(matches!(
            parse_prediction("I think it's about $12 of food", "x"),
            Err(PredictionError::MalformedResponse(_))
        ));
        assert!(parse_prediction("{amount: twelve}", "x").is_err());
    }

    #[test]
    fn test_parse_suggestions() {
        let reply = r#"Here you go:
[
  {"description": "Coffee", "amount": 4.5, "category": "Food", "confidence": 0.9},
  {"description": "Bus pass", "amount": 30, "category": "Transport", "confidence": 0.6}
]"#;
        let s = parse_suggestions(reply).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s[1].description, "Bus pass");
        assert_eq!(s[1].category, Category::Transport);
    }

    #[test]
    fn test_suggestion_without_description_rejected() {
        let reply = r#"[{"amount": 4.5, "category": "Food", "confidence": 0.9}]"#;
        assert!(parse_suggestions(reply).is_err());
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("Food").unwrap(), Category::Food);
        assert_eq!(parse_category(" \"Bills\".\n").unwrap(), Category::Bills);
        assert_eq!(parse_category("Category: Shopping").unwrap(), Category::Shopping);
        assert!(parse_category("Groceries").is_err());
    }

    #[test]
    fn test_truncate_long_raw() {
        let long = "x".repeat(500);
        let err = parse_prediction(&long, "x").unwrap_err();
        let PredictionError::MalformedResponse(msg) = err else {
            panic!("expected malformed response");
        };
        assert!(msg.ends_with("..."));
        assert!(msg.len() < 300);
    }
}
