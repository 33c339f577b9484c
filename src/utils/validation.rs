//! Utilidades de validación
//!
//! Funciones helper para validar los valores que llegan en los payloads
//! de actualización parcial de unidades.

use chrono::NaiveDate;
use serde_json::Value;
use validator::ValidationError;

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error.message = Some("must be a date in YYYY-MM-DD format".into());
        error
    })
}

/// Validar longitud mínima y máxima (después de recortar espacios)
pub fn validate_length(value: &str, min: usize, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        let mut error = ValidationError::new("length");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &len);
        error.message = Some(format!("must be between {} and {} characters", min, max).into());
        return Err(error);
    }
    Ok(trimmed.to_string())
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + serde::Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<T, ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        error.message = Some(format!("must be between {} and {}", min, max).into());
        return Err(error);
    }
    Ok(value)
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_enum<'a>(
    value: &str,
    allowed_values: &[&'a str],
) -> Result<&'a str, ValidationError> {
    allowed_values
        .iter()
        .find(|allowed| **allowed == value.trim())
        .copied()
        .ok_or_else(|| {
            let mut error = ValidationError::new("enum");
            error.add_param("value".into(), &value.to_string());
            error.add_param("allowed_values".into(), &allowed_values.join(", "));
            error.message = Some(format!("must be one of: {}", allowed_values.join(", ")).into());
            error
        })
}

/// Extraer un string de un valor JSON (los formularios siempre envían strings)
pub fn expect_string(value: &Value) -> Result<&str, ValidationError> {
    value.as_str().ok_or_else(|| {
        let mut error = ValidationError::new("type");
        error.add_param("expected".into(), &"string".to_string());
        error.message = Some("must be a string".into());
        error
    })
}

/// Extraer un entero de un número JSON o de un string numérico
pub fn expect_integer(value: &Value) -> Result<i64, ValidationError> {
    let parsed = match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| {
        let mut error = ValidationError::new("type");
        error.add_param("expected".into(), &"integer".to_string());
        error.message = Some("must be an integer".into());
        error
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("2023-12-01").unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()
        );
        assert!(validate_date("01/12/2023").is_err());
        assert!(validate_date("2023-02-30").is_err());
    }

    #[test]
    fn test_validate_length_trims() {
        assert_eq!(validate_length("  Atlas  ", 1, 100).unwrap(), "Atlas");
        assert!(validate_length("   ", 1, 100).is_err());
        assert!(validate_length(&"x".repeat(101), 1, 100).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert_eq!(validate_range(0, 0, 100).unwrap(), 0);
        assert_eq!(validate_range(100, 0, 100).unwrap(), 100);
        assert!(validate_range(101, 0, 100).is_err());
        assert!(validate_range(-1, 0, 100).is_err());
    }

    #[test]
    fn test_validate_enum() {
        let allowed = ["Active", "Maintenance", "Offline"];
        assert_eq!(validate_enum("Offline", &allowed).unwrap(), "Offline");
        assert!(validate_enum("Unknown", &allowed).is_err());
        assert!(validate_enum("active", &allowed).is_err());
    }

    #[test]
    fn test_expect_integer_accepts_numeric_strings() {
        assert_eq!(expect_integer(&json!(42)).unwrap(), 42);
        assert_eq!(expect_integer(&json!(" 17 ")).unwrap(), 17);
        assert!(expect_integer(&json!(4.5)).is_err());
        assert!(expect_integer(&json!("high")).is_err());
        assert!(expect_integer(&json!(null)).is_err());
    }
}
