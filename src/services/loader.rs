//! Source loading and joining
//!
//! Reads the sales, products and suppliers CSV files through the configured
//! schema, normalizes their money and date cells, and left-joins them into
//! one row per sale. Any malformed cell aborts the whole load.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{Reader, ReaderBuilder, StringRecord, Trim};

use crate::config::{Settings, SourcePaths};
use crate::error::{DashboardError, DashboardResult, SourceKind};
use crate::models::{
    EnrichedSale, Money, PaymentStatus, ProductRecord, SaleRecord, SupplierRecord,
};

/// Load and join all three sources
pub fn load(sources: &SourcePaths, settings: &Settings) -> DashboardResult<Vec<EnrichedSale>> {
    SalesLoader::new(settings).load(sources)
}

/// Reads the sources according to a set of [`Settings`]
pub struct SalesLoader<'a> {
    settings: &'a Settings,
}

impl<'a> SalesLoader<'a> {
    /// Create a new loader
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Read all three files and join them
    pub fn load(&self, sources: &SourcePaths) -> DashboardResult<Vec<EnrichedSale>> {
        let sales = self.read_sales(open_source(SourceKind::Sales, &sources.sales)?)?;
        let products = self.read_products(open_source(SourceKind::Products, &sources.products)?)?;
        let suppliers =
            self.read_suppliers(open_source(SourceKind::Suppliers, &sources.suppliers)?)?;

        tracing::info!(
            sales = sales.len(),
            products = products.len(),
            suppliers = suppliers.len(),
            "loaded sources"
        );

        Ok(join(sales, &products, &suppliers))
    }

    /// Parse the sales source
    pub fn read_sales<R: Read>(&self, reader: R) -> DashboardResult<Vec<SaleRecord>> {
        let table = SourceKind::Sales;
        let columns = &self.settings.schema.sales;
        let mut reader = csv_reader(reader);
        let headers = HeaderIndex::new(
            table,
            reader.headers().map_err(|e| DashboardError::csv(table, e))?,
        );

        let sale_id_col = headers.index(&columns.sale_id)?;
        let date_col = headers.index(&columns.date)?;
        let product_id_col = headers.index(&columns.product_id)?;
        let amount_col = headers.index(&columns.sale_amount)?;
        let paid_col = headers.index(&columns.paid)?;
        let customer_col = headers.index(&columns.customer_name)?;

        let mut sales = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result.map_err(|e| DashboardError::csv(table, e))?;
            let row = idx + 1;

            let date = parse_sale_date(cell(&record, date_col), self.settings.year)
                .map_err(|message| DashboardError::parse(table, row, &columns.date, message))?;
            let sale_amount =
                self.parse_amount(table, row, &columns.sale_amount, cell(&record, amount_col))?;
            let flag = cell(&record, paid_col);

            sales.push(SaleRecord {
                sale_id: cell(&record, sale_id_col).to_string(),
                date,
                product_id: cell(&record, product_id_col).to_string(),
                sale_amount,
                payment_status: PaymentStatus::from_flag(flag, &self.settings.affirmative_flags),
                paid_flag: flag.to_string(),
                customer_name: cell(&record, customer_col).to_string(),
            });
        }

        Ok(sales)
    }

    /// Parse the products source
    pub fn read_products<R: Read>(&self, reader: R) -> DashboardResult<Vec<ProductRecord>> {
        let table = SourceKind::Products;
        let columns = &self.settings.schema.products;
        let mut reader = csv_reader(reader);
        let headers = HeaderIndex::new(
            table,
            reader.headers().map_err(|e| DashboardError::csv(table, e))?,
        );

        let product_id_col = headers.index(&columns.product_id)?;
        let supplier_id_col = headers.index(&columns.supplier_id)?;
        let description_col = headers.index(&columns.description)?;
        let cost_col = headers.index(&columns.unit_cost)?;
        let price_col = headers.index(&columns.unit_price)?;

        let mut seen = HashSet::new();
        let mut products = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result.map_err(|e| DashboardError::csv(table, e))?;
            let row = idx + 1;

            let id = cell(&record, product_id_col);
            if !seen.insert(id.to_string()) {
                return Err(DashboardError::duplicate_key(table, &columns.product_id, id));
            }

            let unit_cost =
                self.parse_amount(table, row, &columns.unit_cost, cell(&record, cost_col))?;
            let unit_price = match cell(&record, price_col) {
                "" => None,
                text => Some(self.parse_amount(table, row, &columns.unit_price, text)?),
            };

            products.push(ProductRecord {
                product_id: id.to_string(),
                supplier_id: cell(&record, supplier_id_col).to_string(),
                description: cell(&record, description_col).to_string(),
                unit_cost,
                unit_price,
            });
        }

        Ok(products)
    }

    /// Parse the suppliers source
    pub fn read_suppliers<R: Read>(&self, reader: R) -> DashboardResult<Vec<SupplierRecord>> {
        let table = SourceKind::Suppliers;
        let columns = &self.settings.schema.suppliers;
        let mut reader = csv_reader(reader);
        let headers = HeaderIndex::new(
            table,
            reader.headers().map_err(|e| DashboardError::csv(table, e))?,
        );

        let supplier_id_col = headers.index(&columns.supplier_id)?;
        let supplier_name_col = headers.index(&columns.supplier_name)?;

        let mut seen = HashSet::new();
        let mut suppliers = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| DashboardError::csv(table, e))?;

            let id = cell(&record, supplier_id_col);
            if !seen.insert(id.to_string()) {
                return Err(DashboardError::duplicate_key(table, &columns.supplier_id, id));
            }

            suppliers.push(SupplierRecord::new(id, cell(&record, supplier_name_col)));
        }

        Ok(suppliers)
    }

    fn parse_amount(
        &self,
        table: SourceKind,
        row: usize,
        column: &str,
        text: &str,
    ) -> DashboardResult<Money> {
        Money::parse_with_symbol(text, &self.settings.currency_symbol)
            .map_err(|e| DashboardError::parse(table, row, column, e.to_string()))
    }
}

/// Left-join sales with products and suppliers, computing profit
///
/// The result has exactly one row per sale, in input order. Sales whose
/// product (or whose product's supplier) is unknown keep empty enrichment
/// fields.
pub fn join(
    sales: Vec<SaleRecord>,
    products: &[ProductRecord],
    suppliers: &[SupplierRecord],
) -> Vec<EnrichedSale> {
    let products_by_id: HashMap<&str, &ProductRecord> = products
        .iter()
        .map(|p| (p.product_id.as_str(), p))
        .collect();
    let suppliers_by_id: HashMap<&str, &SupplierRecord> = suppliers
        .iter()
        .map(|s| (s.supplier_id.as_str(), s))
        .collect();

    sales
        .into_iter()
        .map(|sale| {
            let product = products_by_id.get(sale.product_id.as_str()).copied();
            let supplier =
                product.and_then(|p| suppliers_by_id.get(p.supplier_id.as_str()).copied());

            match (product, supplier) {
                (None, _) => tracing::warn!(
                    sale_id = %sale.sale_id,
                    product_id = %sale.product_id,
                    "sale references an unknown product"
                ),
                (Some(p), None) => tracing::warn!(
                    sale_id = %sale.sale_id,
                    supplier_id = %p.supplier_id,
                    "product references an unknown supplier"
                ),
                _ => {}
            }

            EnrichedSale::from_parts(sale, product, supplier)
        })
        .collect()
}

/// Parse a sale date, appending `year` to day/month values
///
/// Accepts "dd/mm" (the source format), "dd/mm/yyyy" and "yyyy-mm-dd".
/// Explicit years must have four digits.
pub fn parse_sale_date(text: &str, year: i32) -> Result<NaiveDate, String> {
    let text = text.trim();
    let invalid = || format!("invalid date '{}'", text);
    let parsed = match text.matches('/').count() {
        1 => NaiveDate::parse_from_str(&format!("{}/{}", text, year), "%d/%m/%Y"),
        2 => {
            if !has_four_digit_year(text.rsplit('/').next()) {
                return Err(invalid());
            }
            NaiveDate::parse_from_str(text, "%d/%m/%Y")
        }
        _ => {
            if !has_four_digit_year(text.split('-').next()) {
                return Err(invalid());
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
        }
    };
    parsed.map_err(|_| invalid())
}

fn has_four_digit_year(segment: Option<&str>) -> bool {
    segment.is_some_and(|s| s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()))
}

fn open_source(table: SourceKind, path: &Path) -> DashboardResult<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DashboardError::SourceNotFound {
                table,
                path: path.to_path_buf(),
            }
        } else {
            DashboardError::Io(format!(
                "Failed to open {} source {}: {}",
                table,
                path.display(),
                e
            ))
        }
    })
}

fn csv_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader)
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

/// Maps configured column names to positions in a header record
struct HeaderIndex {
    table: SourceKind,
    names: Vec<String>,
}

impl HeaderIndex {
    fn new(table: SourceKind, headers: &StringRecord) -> Self {
        let names = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        Self { table, names }
    }

    fn index(&self, column: &str) -> DashboardResult<usize> {
        let column = column.trim();
        self.names
            .iter()
            .position(|name| name == column)
            .ok_or_else(|| DashboardError::missing_column(self.table, column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SALES: &str = "\
id venda,Dia,id da peça,valor da venda,Pago,Nome do cliente
1,01/12,A,\"100,00\",Sim,Ana
2,05/12,B,\"50,00\",Não,Bia
";

    const PRODUCTS: &str = "\
id da peça,id do fornecedor,descrição da peça,valor da peça,valor vender
A,F1,Brinco,\"R$ 40,00\",\"R$ 100,00\"
B,F2,Colar,\"20,00\",
";

    const SUPPLIERS: &str = "\
id do fornecedor,nome do fornecedor
F1,Bijoux SP
F2,Prata Fina
";

    fn date(day: u32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn write_sources(dir: &Path, sales: &str, products: &str, suppliers: &str) -> SourcePaths {
        let sources = SourcePaths {
            sales: dir.join("tati-vendas.csv"),
            products: dir.join("tati-produtos.csv"),
            suppliers: dir.join("tati-fornecedores.csv"),
        };
        std::fs::write(&sources.sales, sales).unwrap();
        std::fs::write(&sources.products, products).unwrap();
        std::fs::write(&sources.suppliers, suppliers).unwrap();
        sources
    }

    #[test]
    fn test_load_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let sources = write_sources(temp_dir.path(), SALES, PRODUCTS, SUPPLIERS);

        let rows = load(&sources, &Settings::default()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sale.sale_id, "1");
        assert_eq!(rows[0].date(), date(1, 12));
        assert_eq!(rows[0].profit, Some(Money::from_cents(6000)));
        assert_eq!(rows[0].supplier_name.as_deref(), Some("Bijoux SP"));
        assert_eq!(rows[0].unit_price, Some(Money::from_cents(10000)));
        assert!(rows[0].payment_status().is_paid());

        assert_eq!(rows[1].date(), date(5, 12));
        assert_eq!(rows[1].profit, Some(Money::from_cents(3000)));
        assert_eq!(rows[1].unit_price, None);
        assert_eq!(rows[1].payment_status(), PaymentStatus::Outstanding);
        assert_eq!(rows[1].sale.paid_flag, "Não");
        assert_eq!(rows[1].sale.customer_name, "Bia");
    }

    #[test]
    fn test_unmatched_product_keeps_row() {
        let settings = Settings::default();
        let loader = SalesLoader::new(&settings);
        let sales = loader
            .read_sales("id venda,Dia,id da peça,valor da venda,Pago,Nome do cliente\n9,03/12,ZZ,\"10,00\",Sim,Caio\n1,01/12,A,\"100,00\",Sim,Ana\n".as_bytes())
            .unwrap();
        let products = loader.read_products(PRODUCTS.as_bytes()).unwrap();
        let suppliers = loader.read_suppliers(SUPPLIERS.as_bytes()).unwrap();

        let rows = join(sales, &products, &suppliers);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sale.sale_id, "9");
        assert_eq!(rows[0].unit_cost, None);
        assert_eq!(rows[0].profit, None);
        assert_eq!(rows[0].description, None);
        assert_eq!(rows[1].profit, Some(Money::from_cents(6000)));
    }

    #[test]
    fn test_join_never_drops_rows() {
        let sales: Vec<SaleRecord> = (0..5)
            .map(|i| {
                SaleRecord::new(
                    i.to_string(),
                    date(1, 12),
                    format!("P{}", i),
                    Money::from_cents(100),
                )
            })
            .collect();

        assert_eq!(join(sales.clone(), &[], &[]).len(), 5);

        let products = vec![ProductRecord::new("P1", "missing", "Anel", Money::from_cents(50))];
        let rows = join(sales, &products, &[]);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[1].profit, Some(Money::from_cents(50)));
        assert_eq!(rows[1].supplier_name, None);
    }

    #[test]
    fn test_missing_source_file() {
        let temp_dir = TempDir::new().unwrap();
        let sources = write_sources(temp_dir.path(), SALES, PRODUCTS, SUPPLIERS);
        std::fs::remove_file(&sources.products).unwrap();

        let err = load(&sources, &Settings::default()).unwrap_err();
        assert!(err.is_source_not_found());
        assert_eq!(err.table(), Some(SourceKind::Products));
    }

    #[test]
    fn test_missing_column() {
        let settings = Settings::default();
        let err = SalesLoader::new(&settings)
            .read_sales("id venda,Dia,id da peça,Pago,Nome do cliente\n".as_bytes())
            .unwrap_err();

        assert!(err.is_schema());
        assert!(err.to_string().contains("valor da venda"));
    }

    #[test]
    fn test_bad_money_names_row_and_column() {
        let settings = Settings::default();
        let err = SalesLoader::new(&settings)
            .read_sales("id venda,Dia,id da peça,valor da venda,Pago,Nome do cliente\n1,01/12,A,\"10,00\",Sim,Ana\n2,02/12,A,dez reais,Sim,Bia\n".as_bytes())
            .unwrap_err();

        match err {
            DashboardError::Parse { table, row, column, .. } => {
                assert_eq!(table, SourceKind::Sales);
                assert_eq!(row, 2);
                assert_eq!(column, "valor da venda");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_date() {
        let settings = Settings::default();
        let err = SalesLoader::new(&settings)
            .read_sales("id venda,Dia,id da peça,valor da venda,Pago,Nome do cliente\n1,31/02,A,\"10,00\",Sim,Ana\n".as_bytes())
            .unwrap_err();

        assert!(err.is_parse());
        assert!(err.to_string().contains("Dia"));
    }

    #[test]
    fn test_ragged_row_names_source() {
        let settings = Settings::default();
        let err = SalesLoader::new(&settings)
            .read_products("id da peça,id do fornecedor,descrição da peça,valor da peça,valor vender\nA,F1,Brinco,\"40,00\"\n".as_bytes())
            .unwrap_err();

        assert!(matches!(err, DashboardError::Csv { .. }));
        assert_eq!(err.table(), Some(SourceKind::Products));
        assert!(err.to_string().starts_with("CSV error in products source: "));
    }

    #[test]
    fn test_invalid_utf8_names_source() {
        let settings = Settings::default();
        let mut bytes = b"id venda,Dia,id da pe\xc3\xa7a,valor da venda,Pago,Nome do cliente\n1,01/12,A,\"10,00\",Sim,".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);

        let err = SalesLoader::new(&settings)
            .read_sales(bytes.as_slice())
            .unwrap_err();

        assert!(matches!(err, DashboardError::Csv { .. }));
        assert_eq!(err.table(), Some(SourceKind::Sales));
    }

    #[test]
    fn test_empty_cost_is_an_error() {
        let settings = Settings::default();
        let err = SalesLoader::new(&settings)
            .read_products("id da peça,id do fornecedor,descrição da peça,valor da peça,valor vender\nA,F1,Brinco,,\n".as_bytes())
            .unwrap_err();

        assert!(err.is_parse());
    }

    #[test]
    fn test_duplicate_reference_keys() {
        let settings = Settings::default();
        let loader = SalesLoader::new(&settings);

        let err = loader
            .read_suppliers("id do fornecedor,nome do fornecedor\nF1,A\nF1,B\n".as_bytes())
            .unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains("F1"));

        let err = loader
            .read_products("id da peça,id do fornecedor,descrição da peça,valor da peça,valor vender\nA,F1,x,\"1,00\",\nA,F1,y,\"2,00\",\n".as_bytes())
            .unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_custom_schema_and_year() {
        let mut settings = Settings::default();
        settings.year = 2023;
        settings.schema.suppliers.supplier_name = "Nome".into();

        let loader = SalesLoader::new(&settings);
        let suppliers = loader
            .read_suppliers("id do fornecedor,Nome\nF9,Loja\n".as_bytes())
            .unwrap();
        assert_eq!(suppliers[0].supplier_name, "Loja");

        let sales = loader.read_sales(SALES.as_bytes()).unwrap();
        assert_eq!(sales[0].date, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
    }

    #[test]
    fn test_parse_sale_date_formats() {
        assert_eq!(parse_sale_date("01/12", 2024), Ok(date(1, 12)));
        assert_eq!(parse_sale_date(" 5/12 ", 2024), Ok(date(5, 12)));
        assert_eq!(parse_sale_date("01/12/2023", 2024), NaiveDate::from_ymd_opt(2023, 12, 1).ok_or(String::new()));
        assert_eq!(parse_sale_date("2024-12-07", 2024), Ok(date(7, 12)));
        assert!(parse_sale_date("12/31", 2024).is_err());
        assert!(parse_sale_date("01/12/24", 2024).is_err());
        assert!(parse_sale_date("24-12-07", 2024).is_err());
        assert!(parse_sale_date("01/12/02024", 2024).is_err());
        assert!(parse_sale_date("", 2024).is_err());
    }
}
