//! 展示用数值格式化

/// 千分位分组，例如 `1234567` -> `1,234,567`
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 里程：四舍五入到整数并分组
pub fn format_mileage(miles: f64) -> String {
    group_thousands(miles.round() as i64)
}

/// 运行小时：保留一位小数
pub fn format_hours(hours: f64) -> String {
    format!("{:.1}", hours)
}

/// 金额：`$1,234.50`
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!(
        "{}${}.{:02}",
        sign,
        group_thousands((cents / 100) as i64),
        cents % 100
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(-1234567), "-1,234,567");
    }

    #[test]
    fn test_format_mileage_rounds() {
        assert_eq!(format_mileage(104_999.6), "105,000");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(85.0), "$85.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(-12.3), "-$12.30");
    }

    #[test]
    fn test_format_currency_saturated_amounts() {
        // 超出 i64 的金额在转换时饱和，不能在取绝对值时溢出
        assert!(format_currency(-1e300).starts_with("-$92,233,720,368,547,758."));
        assert!(format_currency(1e300).starts_with("$92,233,720,368,547,758."));
    }
}
