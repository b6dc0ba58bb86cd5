/// Formats a price in Argentine pesos: `$ 1.234,56`.
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return "$ -".to_string();
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let units = group_thousands(cents / 100);
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}$ {units},{:02}", cents % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
