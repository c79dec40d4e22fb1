use clap::ValueEnum;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

/// How digits are grouped when printing money.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// 12,34,567
    #[default]
    Indian,
    /// 1,234,567
    Western,
}

impl std::str::FromStr for Grouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indian" => Ok(Grouping::Indian),
            "western" => Ok(Grouping::Western),
            other => Err(format!("unknown grouping '{other}' (expected indian or western)")),
        }
    }
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let step = match grouping {
        Grouping::Indian => 2,
        Grouping::Western => 3,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Whole-unit money string, e.g. `₹1,36,000` or `-₹2,500`.
pub fn format_money(amount: Decimal, symbol: &str, grouping: Grouping) -> String {
    let rounded = amount.round_dp(0);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();
    format!("{sign}{symbol}{}", group_digits(&digits, grouping))
}

/// Percentage rounded to whole units, e.g. `68%`.
pub fn format_percent(p: Decimal) -> String {
    format!("{}%", p.round_dp(0).normalize())
}

pub fn format_optional_percent(p: Option<Decimal>) -> String {
    p.map(format_percent).unwrap_or_else(|| "n/a".to_string())
}

/// `[=====-----]` style bar, clamped to 0..=100.
pub fn progress_bar(percent: Decimal, width: usize) -> String {
    let percent_i = percent.round_dp(0).to_i64().unwrap_or(0).clamp(0, 100) as usize;
    let filled = (percent_i * width) / 100;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "=".repeat(filled), "-".repeat(empty))
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if headers.is_empty() {
        println!("(no columns)");
        return;
    }

    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

    for row in rows {
        for (i, cell) in row.iter().take(cols).enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    fn print_row(cells: &[String], widths: &[usize]) {
        print!("|");
        for (i, w) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            print!(" {:width$} |", cell, width = *w);
        }
        println!();
    }

    fn print_sep(widths: &[usize]) {
        print!("|");
        for w in widths {
            print!("{}|", "-".repeat(w + 2));
        }
        println!();
    }

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    print_row(&header_cells, &widths);
    print_sep(&widths);
    for row in rows {
        print_row(row, &widths);
    }
}

pub fn print_tsv(headers: &[&str], rows: &[Vec<String>]) {
    println!("{}", headers.join("\t"));
    for row in rows {
        println!("{}", row.join("\t"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indian_grouping() {
        let g = Grouping::Indian;
        assert_eq!(format_money(Decimal::from(136000), "₹", g), "₹1,36,000");
        assert_eq!(format_money(Decimal::from(1234567), "₹", g), "₹12,34,567");
        assert_eq!(format_money(Decimal::from(2500), "₹", g), "₹2,500");
        assert_eq!(format_money(Decimal::from(649), "₹", g), "₹649");
    }

    #[test]
    fn western_grouping() {
        let g = Grouping::Western;
        assert_eq!(format_money(Decimal::from(136000), "₹", g), "₹136,000");
        assert_eq!(format_money(Decimal::from(1234567), "$", g), "$1,234,567");
    }

    #[test]
    fn negative_and_fractional_money() {
        let g = Grouping::Western;
        assert_eq!(format_money(Decimal::from(-2500), "₹", g), "-₹2,500");
        assert_eq!(format_money(Decimal::new(91428, 1), "₹", g), "₹9,143");
        assert_eq!(format_money(Decimal::new(-4, 1), "₹", g), "₹0");
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(Decimal::new(5625, 2)), "56%");
        assert_eq!(format_percent(Decimal::from(125)), "125%");
        assert_eq!(format_optional_percent(None), "n/a");
    }

    #[test]
    fn progress_bar_clamps() {
        assert_eq!(progress_bar(Decimal::from(68), 10), "[======----]");
        assert_eq!(progress_bar(Decimal::from(125), 10), "[==========]");
        assert_eq!(progress_bar(Decimal::from(-5), 4), "[----]");
    }
}
