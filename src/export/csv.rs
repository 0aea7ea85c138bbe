//! CSV Export functionality
//!
//! Exports the enriched sales table (a debug dump of the joined data) and
//! the dashboard aggregates to CSV format.

use crate::error::DashboardResult;
use crate::models::{format_money, EnrichedSale, Money};
use crate::reports::DashboardReport;
use chrono::NaiveDate;
use std::io::Write;

const ENRICHED_HEADER: [&str; 13] = [
    "Sale",
    "Date",
    "Product Id",
    "Amount",
    "Paid Flag",
    "Status",
    "Customer",
    "Supplier Id",
    "Description",
    "Unit Cost",
    "Unit Price",
    "Supplier",
    "Profit",
];

fn optional_money(value: Option<Money>) -> String {
    value.map(format_money).unwrap_or_default()
}

/// Export the enriched table, one row per sale, unknown fields left blank
pub fn export_enriched_csv<W: Write>(sales: &[EnrichedSale], writer: &mut W) -> DashboardResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(ENRICHED_HEADER)?;

    for sale in sales {
        wtr.write_record([
            sale.sale.sale_id.clone(),
            sale.date().to_string(),
            sale.sale.product_id.clone(),
            format_money(sale.sale_amount()),
            sale.sale.paid_flag.clone(),
            sale.payment_status().to_string(),
            sale.sale.customer_name.clone(),
            sale.supplier_id.clone().unwrap_or_default(),
            sale.description.clone().unwrap_or_default(),
            optional_money(sale.unit_cost),
            optional_money(sale.unit_price),
            sale.supplier_name.clone().unwrap_or_default(),
            optional_money(sale.profit),
        ])?;
    }

    wtr.flush()?;
    tracing::info!(rows = sales.len(), "wrote enriched table");
    Ok(())
}

/// One line of the long-format report export
struct ReportLine<'a> {
    section: &'static str,
    date: Option<NaiveDate>,
    sale_id: &'a str,
    name: &'a str,
    sales: Money,
    profit: Option<Money>,
    count: Option<usize>,
}

impl ReportLine<'_> {
    fn record(&self) -> [String; 7] {
        [
            self.section.to_string(),
            self.date.map(|d| d.to_string()).unwrap_or_default(),
            self.sale_id.to_string(),
            self.name.to_string(),
            format_money(self.sales),
            optional_money(self.profit),
            self.count.map(|c| c.to_string()).unwrap_or_default(),
        ]
    }
}

/// Export every aggregate of a report as one long table keyed by section
pub fn export_report_csv<W: Write>(report: &DashboardReport, writer: &mut W) -> DashboardResult<()> {
    let mut lines: Vec<ReportLine<'_>> = Vec::new();

    let cards = &report.summary;
    lines.push(ReportLine {
        section: "summary",
        date: None,
        sale_id: "",
        name: "total",
        sales: cards.total_sales,
        profit: Some(cards.total_profit),
        count: Some(cards.sale_count),
    });
    if let Some(average) = cards.average_ticket {
        lines.push(ReportLine {
            section: "summary",
            date: None,
            sale_id: "",
            name: "average ticket",
            sales: average,
            profit: None,
            count: None,
        });
    }

    lines.extend(report.daily.rows.iter().map(|r| ReportLine {
        section: "daily",
        date: Some(r.date),
        sale_id: "",
        name: "",
        sales: r.sale_amount,
        profit: Some(r.profit),
        count: Some(r.sale_count),
    }));

    lines.extend(report.suppliers.totals.iter().map(|t| ReportLine {
        section: "supplier",
        date: None,
        sale_id: "",
        name: t.label(),
        sales: t.sale_amount,
        profit: None,
        count: Some(t.sale_count),
    }));

    lines.extend(report.suppliers.daily.iter().map(|d| ReportLine {
        section: "supplier_daily",
        date: Some(d.date),
        sale_id: "",
        name: d.label(),
        sales: d.sale_amount,
        profit: None,
        count: None,
    }));

    lines.extend(report.products.rows.iter().map(|r| ReportLine {
        section: "product",
        date: None,
        sale_id: "",
        name: r.label(),
        sales: r.sale_amount,
        profit: Some(r.profit),
        count: Some(r.sale_count),
    }));

    lines.extend(report.payments.totals.iter().map(|t| ReportLine {
        section: "payment",
        date: None,
        sale_id: "",
        name: t.status.label(),
        sales: t.sale_amount,
        profit: None,
        count: Some(t.sale_count),
    }));

    lines.extend(report.payments.outstanding.iter().map(|s| ReportLine {
        section: "outstanding",
        date: Some(s.date),
        sale_id: &s.sale_id,
        name: &s.customer_name,
        sales: s.sale_amount,
        profit: None,
        count: None,
    }));

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Section", "Date", "Sale", "Name", "Sales", "Profit", "Count"])?;
    for line in &lines {
        wtr.write_record(line.record())?;
    }
    wtr.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentStatus, ProductRecord, SaleRecord, SupplierRecord};
    use crate::services::SalesFilter;

    fn sales() -> Vec<EnrichedSale> {
        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let product = ProductRecord::new("A", "F1", "Anel", Money::from_cents(4000))
            .with_price(Money::from_cents(12000));
        let supplier = SupplierRecord::new("F1", "Bijoux SP");
        let matched = SaleRecord::new("1", date, "A", Money::from_cents(10000))
            .with_payment("Sim", PaymentStatus::Paid)
            .with_customer("Ana");
        let unmatched = SaleRecord::new("2", date, "ZZ", Money::from_cents(5000))
            .with_payment("Não", PaymentStatus::Outstanding)
            .with_customer("Bia");
        vec![
            EnrichedSale::from_parts(matched, Some(&product), Some(&supplier)),
            EnrichedSale::from_parts(unmatched, None, None),
        ]
    }

    #[test]
    fn test_enriched_dump() {
        let mut out = Vec::new();
        export_enriched_csv(&sales(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Sale,Date,Product Id,Amount"));
        assert!(lines[0].ends_with("Supplier,Profit"));
        assert_eq!(
            lines[1],
            "1,2024-12-01,A,\"100,00\",Sim,Paid,Ana,F1,Anel,\"40,00\",\"120,00\",Bijoux SP,\"60,00\""
        );
        assert_eq!(lines[2], "2,2024-12-01,ZZ,\"50,00\",Não,Outstanding,Bia,,,,,,");
    }

    #[test]
    fn test_report_long_format() {
        let report = DashboardReport::run(&sales(), &SalesFilter::all());
        let mut out = Vec::new();
        export_report_csv(&report, &mut out).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        let sections: Vec<&str> = rows.iter().map(|r| &r[0]).collect();

        assert_eq!(sections.iter().filter(|s| **s == "daily").count(), 1);
        assert_eq!(sections.iter().filter(|s| **s == "payment").count(), 2);

        let outstanding = rows.iter().find(|r| &r[0] == "outstanding").unwrap();
        assert_eq!(&outstanding[2], "2");
        assert_eq!(&outstanding[3], "Bia");
        assert_eq!(&outstanding[4], "50,00");

        let total = &rows[0];
        assert_eq!(&total[4], "150,00");
        assert_eq!(&total[5], "60,00");
        assert_eq!(&total[6], "2");
    }
}
