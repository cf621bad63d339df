use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use wallet_domain::{parse_month_key, Transaction, DEFAULT_CURRENCY};

use crate::CoreError;

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: DateTime<Utc>) -> String;
}

/// Day/month order used when printing a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `5 Jan 2024`
    #[default]
    DayFirst,
    /// `Jan 5, 2024`
    MonthFirst,
}

impl DateStyle {
    /// Picks the order for a BCP 47 tag such as `en-GB` or `en_US`.
    /// Unknown or malformed tags get the day-first layout.
    pub fn from_locale(locale: &str) -> Self {
        let region = locale
            .split(['-', '_'])
            .nth(1)
            .map(str::to_ascii_uppercase);
        match region.as_deref() {
            Some("US") | Some("PH") => DateStyle::MonthFirst,
            _ => DateStyle::DayFirst,
        }
    }
}

/// Formatter bound to the wallet's configured currency and locale.
#[derive(Debug, Clone)]
pub struct DefaultFormatter {
    pub currency: String,
    pub date_style: DateStyle,
}

impl DefaultFormatter {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            date_style: DateStyle::default(),
        }
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.date_style = DateStyle::from_locale(locale);
        self
    }
}

impl Default for DefaultFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

impl CurrencyFormatter for DefaultFormatter {
    fn format_amount(&self, amount: f64) -> String {
        format_currency(amount, &self.currency)
    }
}

impl DateFormatter for DefaultFormatter {
    fn format_date(&self, date: DateTime<Utc>) -> String {
        format_date_with_style(date, self.date_style)
    }
}

/// Renders `value` with thousands separators and a currency marker.
///
/// IRR has no minor unit on display, so it is shown without decimals; every
/// other code gets two. `$`, `€`, `£` and `¥` replace their codes, anything
/// else is written as a `CODE ` prefix.
pub fn format_currency(value: f64, currency: &str) -> String {
    if value.is_nan() {
        return "0".to_string();
    }
    let code = currency.trim().to_ascii_uppercase();
    let code = if code.is_empty() {
        DEFAULT_CURRENCY.to_string()
    } else {
        code
    };
    let decimals = if code == DEFAULT_CURRENCY { 0 } else { 2 };

    let rendered = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match rendered.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rendered.as_str(), None),
    };
    let mut number = group_thousands(whole);
    if let Some(fraction) = fraction {
        number.push('.');
        number.push_str(fraction);
    }

    let negative = value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    match currency_symbol(&code) {
        Some(symbol) => format!("{sign}{symbol}{number}"),
        None => format!("{sign}{code} {number}"),
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" | "CNY" => Some("¥"),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `5 Jan 2024` style.
pub fn format_date(date: DateTime<Utc>) -> String {
    format_date_with_style(date, DateStyle::DayFirst)
}

pub fn format_date_with_style(date: DateTime<Utc>, style: DateStyle) -> String {
    match style {
        DateStyle::DayFirst => date.format("%-d %b %Y").to_string(),
        DateStyle::MonthFirst => date.format("%b %-d, %Y").to_string(),
    }
}

/// Turns `2024-03` into `March 2024`; anything unparseable is echoed back.
pub fn format_budget_month(month: &str) -> String {
    match parse_month_key(month) {
        Some(first_day) => first_day.format("%B %Y").to_string(),
        None => month.to_string(),
    }
}

pub const CSV_HEADERS: [&str; 5] = ["Date", "Type", "Category", "Amount", "Description"];

/// Builds the export document. Every field is quoted and rows are separated by
/// `\n` with no trailing newline.
pub fn build_transactions_csv(transactions: &[Transaction]) -> Result<String, CoreError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS).map_err(csv_error)?;
    for txn in transactions {
        writer
            .write_record([
                txn.date.format("%Y-%m-%d").to_string(),
                txn.kind.as_str().to_string(),
                txn.category.clone(),
                txn.amount.to_string(),
                txn.description.clone().unwrap_or_default(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| CoreError::Serde(err.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|err| CoreError::Serde(err.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn csv_error(err: csv::Error) -> CoreError {
    CoreError::Serde(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use wallet_domain::TransactionKind;

    #[test]
    fn currency_defaults_to_whole_rials() {
        assert_eq!(format_currency(1_234_567.6, "IRR"), "IRR 1,234,568");
        assert_eq!(format_currency(0.0, ""), "IRR 0");
        assert_eq!(format_currency(f64::NAN, "USD"), "0");
    }

    #[test]
    fn currency_symbols_and_negatives() {
        assert_eq!(format_currency(1234.5, "usd"), "$1,234.50");
        assert_eq!(format_currency(-99.999, "EUR"), "-€100.00");
        assert_eq!(format_currency(12.0, "CHF"), "CHF 12.00");
        assert_eq!(format_currency(-0.001, "GBP"), "£0.00");
    }

    #[test]
    fn dates_and_months() {
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 22, 0, 0).unwrap();
        assert_eq!(format_date(at), "5 Jan 2024");
        assert_eq!(format_budget_month("2024-03"), "March 2024");
        assert_eq!(format_budget_month("soon"), "soon");
        let formatter = DefaultFormatter::new("USD");
        assert_eq!(formatter.format_amount(3.0), "$3.00");
    }

    #[test]
    fn locale_decides_day_or_month_first() {
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(DateStyle::from_locale("en-GB"), DateStyle::DayFirst);
        assert_eq!(DateStyle::from_locale("en_us"), DateStyle::MonthFirst);
        assert_eq!(DateStyle::from_locale("fa"), DateStyle::DayFirst);

        let us = DefaultFormatter::default().with_locale("en-US");
        assert_eq!(us.format_date(at), "Jan 5, 2024");
        assert_eq!(DefaultFormatter::default().format_date(at), "5 Jan 2024");
    }

    #[test]
    fn csv_quotes_every_field_and_doubles_quotes() {
        let at = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let txn = Transaction {
            id: 1,
            category: "Food".into(),
            amount: 12.5,
            kind: TransactionKind::Expense,
            description: Some("lunch \"deluxe\", extra".into()),
            date: at,
            created_at: at,
            updated_at: at,
        };
        let plain = Transaction {
            id: 2,
            description: None,
            amount: 1000.0,
            kind: TransactionKind::Income,
            category: "Salary".into(),
            ..txn.clone()
        };

        let csv = build_transactions_csv(&[txn, plain]).unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(
            lines,
            vec![
                "\"Date\",\"Type\",\"Category\",\"Amount\",\"Description\"",
                "\"2024-01-10\",\"expense\",\"Food\",\"12.5\",\"lunch \"\"deluxe\"\", extra\"",
                "\"2024-01-10\",\"income\",\"Salary\",\"1000\",\"\"",
            ]
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn csv_of_nothing_is_just_the_header() {
        let csv = build_transactions_csv(&[]).unwrap();
        assert_eq!(csv, "\"Date\",\"Type\",\"Category\",\"Amount\",\"Description\"");
    }
}
