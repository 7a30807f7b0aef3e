//! 表单输入解析
//!
//! 所有数值字段在发请求前都在这里校验，错误信息带上字段名。

use crate::error::{ApiError, ApiResult};

/// 非空文本，返回去掉首尾空白后的值
pub fn require_non_empty(field: &str, text: &str) -> ApiResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ApiError::invalid_input(format!("{field} is required.")));
    }
    Ok(trimmed.to_string())
}

fn parse_number(field: &str, text: &str) -> ApiResult<f64> {
    let trimmed = require_non_empty(field, text)?;
    let value: f64 = trimmed
        .replace(',', "")
        .parse()
        .map_err(|_| ApiError::invalid_input(format!("{field} must be a number.")))?;
    if !value.is_finite() {
        return Err(ApiError::invalid_input(format!("{field} must be a number.")));
    }
    Ok(value)
}

/// 读数、费用等：允许 0，不允许负数
pub fn parse_non_negative(field: &str, text: &str) -> ApiResult<f64> {
    let value = parse_number(field, text)?;
    if value < 0.0 {
        return Err(ApiError::invalid_input(format!("{field} cannot be negative.")));
    }
    Ok(value)
}

/// 周期长度等：必须严格大于 0
pub fn parse_positive(field: &str, text: &str) -> ApiResult<f64> {
    let value = parse_number(field, text)?;
    if value <= 0.0 {
        return Err(ApiError::invalid_input(format!("{field} must be greater than zero.")));
    }
    Ok(value)
}

pub fn parse_count(field: &str, text: &str) -> ApiResult<u32> {
    let trimmed = require_non_empty(field, text)?;
    match trimmed.parse::<u32>() {
        Ok(0) => Err(ApiError::invalid_input(format!("{field} must be at least 1."))),
        Ok(n) => Ok(n),
        Err(_) => Err(ApiError::invalid_input(format!("{field} must be a whole number."))),
    }
}

/// 可选文本，空白视为未填写
pub fn optional_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: ApiResult<impl std::fmt::Debug>) -> String {
        result.unwrap_err().user_message()
    }

    #[test]
    fn test_non_negative_accepts_zero_and_grouping() {
        assert_eq!(parse_non_negative("Mileage", " 0 ").unwrap(), 0.0);
        assert_eq!(parse_non_negative("Mileage", "12,345.5").unwrap(), 12345.5);
    }

    #[test]
    fn test_non_negative_rejects_garbage() {
        assert_eq!(message(parse_non_negative("Cost", "")), "Cost is required.");
        assert_eq!(message(parse_non_negative("Cost", "12abc")), "Cost must be a number.");
        assert_eq!(message(parse_non_negative("Cost", "NaN")), "Cost must be a number.");
        assert_eq!(message(parse_non_negative("Cost", "inf")), "Cost must be a number.");
        assert_eq!(message(parse_non_negative("Cost", "-5")), "Cost cannot be negative.");
    }

    #[test]
    fn test_positive_rejects_zero() {
        assert_eq!(
            message(parse_positive("Interval", "0")),
            "Interval must be greater than zero."
        );
        assert_eq!(parse_positive("Interval", "7500").unwrap(), 7500.0);
    }

    #[test]
    fn test_count() {
        assert_eq!(parse_count("Impact", "4").unwrap(), 4);
        assert_eq!(message(parse_count("Impact", "0")), "Impact must be at least 1.");
        assert_eq!(message(parse_count("Impact", "2.5")), "Impact must be a whole number.");
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("   "), None);
        assert_eq!(optional_text(" swapped filter "), Some("swapped filter".into()));
    }
}
