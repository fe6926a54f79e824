//! Text formatting for readouts, slider labels and chart axes.

use chrono::NaiveDate;
use pv_core::Real;
use pv_model::Payback;

/// Currency symbol shown before money amounts.
pub const CURRENCY_SYMBOL: &str = "Rp";
/// Non-leap years would shift every date after February by one day; the
/// calendar labels follow 2024.
const LABEL_YEAR: i32 = 2024;
const NOT_APPLICABLE: &str = "N/A";

pub fn format_power(watts: Real) -> String {
    format!("{watts:.1} W")
}

pub fn format_energy(kwh: Real) -> String {
    format!("{kwh:.2} kWh")
}

/// Fraction in [0, 1] shown as a percentage with one decimal.
pub fn format_efficiency(fraction: Real) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Whole-unit amount with `.` thousands separators, e.g. `Rp 1.234.567`.
pub fn format_money(amount: Real) -> String {
    if !amount.is_finite() {
        return NOT_APPLICABLE.to_string();
    }
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{CURRENCY_SYMBOL} {sign}{grouped}")
}

pub fn format_payback(payback: Payback) -> String {
    match payback {
        Payback::Years(years) => format!("~ {years:.1} years"),
        Payback::NotApplicable => NOT_APPLICABLE.to_string(),
    }
}

/// `"172 (June 20)"`.
pub fn format_day(day_of_year: u16) -> String {
    match NaiveDate::from_yo_opt(LABEL_YEAR, u32::from(day_of_year)) {
        Some(date) => format!("{day_of_year} ({})", date.format("%B %-d")),
        None => day_of_year.to_string(),
    }
}

/// Decimal hours as a 24-hour clock, `"06:15"`.
pub fn format_clock(time_of_day_h: Real) -> String {
    let total_minutes = (time_of_day_h * 60.0).round().max(0.0) as u32;
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Chart axis label for a sample hour, `"5:00"`, `"5:30"`.
pub fn format_chart_label(hour: Real) -> String {
    let total_minutes = (hour * 60.0).round().max(0.0) as u32;
    format!("{}:{:02}", total_minutes / 60, total_minutes % 60)
}

pub fn format_cloud(fraction: Real) -> String {
    format!("{:.0}%", fraction * 100.0)
}

pub fn format_temperature(celsius: Real) -> String {
    format!("{celsius}°C")
}

pub fn format_area(m2: Real) -> String {
    format!("{m2} m²")
}

pub fn format_angle(deg: Real) -> String {
    format!("{deg}°")
}
