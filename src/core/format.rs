/// Formats an amount as whole currency units with thousands separators,
/// e.g. `Rp 1,300,000`.
pub fn format_money(symbol: &str, amount: f64) -> String {
    format!("{symbol} {}", group_thousands(amount))
}

fn group_thousands(amount: f64) -> String {
    let rounded = amount.round();
    if !rounded.is_finite() {
        return format!("{amount}");
    }
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
