//! Report formatting for terminal output
//!
//! Renders the dashboard aggregates as tables. Charts from the web version
//! become a bar column scaled to the largest value in the table.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Money, PaymentStatus};
use crate::reports::{DailyReport, PaymentReport, ProductReport, SummaryCards, SupplierReport};

/// Message shown when the filter leaves nothing to report
pub const EMPTY_PERIOD: &str = "No sales in the selected period.";

const BAR_WIDTH: usize = 20;

/// Create a simple bar chart cell
pub fn format_bar(value: Money, max_value: Money, width: usize) -> String {
    if max_value.cents() <= 0 || value.cents() <= 0 {
        return String::new();
    }

    let filled = ((value.to_f64() / max_value.to_f64()) * width as f64).round() as usize;
    let filled = filled.clamp(1, width);

    "█".repeat(filled)
}

/// Format a share of a total as a percentage
pub fn format_percentage(part: Money, total: Money) -> String {
    if total.is_zero() {
        return "-".to_string();
    }
    let pct = part.to_f64() / total.to_f64() * 100.0;
    if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Render rows as a rounded table with every column after the first right-aligned
pub(crate) fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "Indicator")]
    label: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Format the headline cards
pub fn format_summary(cards: &SummaryCards, symbol: &str) -> String {
    let average = cards
        .average_ticket
        .map(|m| m.format_with_symbol(symbol))
        .unwrap_or_else(|| "-".to_string());

    let rows = vec![
        CardRow {
            label: "Total sales",
            value: cards.total_sales.format_with_symbol(symbol),
        },
        CardRow {
            label: "Total profit",
            value: cards.total_profit.format_with_symbol(symbol),
        },
        CardRow {
            label: "Average ticket",
            value: average,
        },
        CardRow {
            label: "Sales",
            value: cards.sale_count.to_string(),
        },
    ];

    render(rows)
}

#[derive(Tabled)]
struct DailyRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Sales")]
    sales: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "")]
    bar: String,
}

/// Format sales and profit by day
pub fn format_daily(report: &DailyReport, symbol: &str) -> String {
    if report.is_empty() {
        return EMPTY_PERIOD.to_string();
    }

    let max = report.rows.iter().map(|r| r.sale_amount).max().unwrap_or_default();
    let rows: Vec<DailyRow> = report
        .rows
        .iter()
        .map(|r| DailyRow {
            date: r.date.format("%d/%m/%Y").to_string(),
            sales: r.sale_amount.format_with_symbol(symbol),
            profit: r.profit.format_with_symbol(symbol),
            count: r.sale_count,
            bar: format_bar(r.sale_amount, max, BAR_WIDTH),
        })
        .collect();

    render(rows)
}

#[derive(Tabled)]
struct SupplierRow {
    #[tabled(rename = "Supplier")]
    name: String,
    #[tabled(rename = "Sales")]
    sales: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct SupplierDayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Supplier")]
    name: String,
    #[tabled(rename = "Sales")]
    sales: String,
}

/// Format sales by supplier, followed by the per-day breakdown
pub fn format_suppliers(report: &SupplierReport, symbol: &str) -> String {
    if report.totals.is_empty() {
        return EMPTY_PERIOD.to_string();
    }

    let total = report.total_sales();
    let max = report.totals.iter().map(|t| t.sale_amount).max().unwrap_or_default();
    let totals: Vec<SupplierRow> = report
        .totals
        .iter()
        .map(|t| SupplierRow {
            name: t.label().to_string(),
            sales: t.sale_amount.format_with_symbol(symbol),
            count: t.sale_count,
            share: format_percentage(t.sale_amount, total),
            bar: format_bar(t.sale_amount, max, BAR_WIDTH),
        })
        .collect();

    let daily: Vec<SupplierDayRow> = report
        .daily
        .iter()
        .map(|d| SupplierDayRow {
            date: d.date.format("%d/%m/%Y").to_string(),
            name: d.label().to_string(),
            sales: d.sale_amount.format_with_symbol(symbol),
        })
        .collect();

    format!("{}\n\nBy day\n{}", render(totals), render(daily))
}

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "Product")]
    description: String,
    #[tabled(rename = "Sales")]
    sales: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "")]
    bar: String,
}

/// Format the product ranking, optionally capped to the top `limit`
pub fn format_products(report: &ProductReport, limit: Option<usize>, symbol: &str) -> String {
    if report.rows.is_empty() {
        return EMPTY_PERIOD.to_string();
    }

    let shown = match limit {
        Some(limit) => report.top(limit),
        None => &report.rows[..],
    };
    let max = shown.first().map(|r| r.sale_amount).unwrap_or_default();
    let rows: Vec<ProductRow> = shown
        .iter()
        .map(|r| ProductRow {
            description: r.label().to_string(),
            sales: r.sale_amount.format_with_symbol(symbol),
            profit: r.profit.format_with_symbol(symbol),
            count: r.sale_count,
            bar: format_bar(r.sale_amount, max, BAR_WIDTH),
        })
        .collect();

    render(rows)
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Status")]
    status: PaymentStatus,
    #[tabled(rename = "Sales")]
    sales: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct OutstandingRow {
    #[tabled(rename = "Sale")]
    sale_id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format the paid/outstanding split and the sales still to collect
pub fn format_payments(report: &PaymentReport, symbol: &str) -> String {
    let total = report.paid() + report.outstanding_total();
    if report.totals.iter().all(|t| t.sale_count == 0) {
        return EMPTY_PERIOD.to_string();
    }

    let totals: Vec<StatusRow> = report
        .totals
        .iter()
        .map(|t| StatusRow {
            status: t.status,
            sales: t.sale_amount.format_with_symbol(symbol),
            count: t.sale_count,
            share: format_percentage(t.sale_amount, total),
        })
        .collect();

    let mut output = render(totals);
    output.push_str("\n\nTo receive\n");
    if report.outstanding.is_empty() {
        output.push_str("Nothing to receive.");
        return output;
    }

    let outstanding: Vec<OutstandingRow> = report
        .outstanding
        .iter()
        .map(|s| OutstandingRow {
            sale_id: s.sale_id.clone(),
            date: s.date.format("%d/%m/%Y").to_string(),
            customer: s.customer_name.clone(),
            amount: s.sale_amount.format_with_symbol(symbol),
        })
        .collect();
    output.push_str(&render(outstanding));
    output
}
