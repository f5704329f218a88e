//! Output formatting for products and categories (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::klik::models::{Product, SuperCategory};

/// Formats crawl results for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a product list.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => csv_product_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => json(products),
            OutputFormat::Table => self.table_products(products),
            OutputFormat::Markdown => self.markdown_products(products),
            OutputFormat::Csv => self.csv_products(products),
        }
    }

    /// Formats the category tree.
    pub fn format_categories(&self, categories: &[SuperCategory]) -> String {
        if categories.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => csv_category_header(),
                _ => "No categories found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => json(categories),
            OutputFormat::Table => self.table_categories(categories),
            OutputFormat::Markdown => self.markdown_categories(categories),
            OutputFormat::Csv => self.csv_categories(categories),
        }
    }

    // Table formatting

    fn table_products(&self, products: &[Product]) -> String {
        let plu_width = 10;
        let price_width = 12;
        let old_width = 12;
        let disc_width = 6;
        let title_width = 50;

        let mut lines = Vec::new();

        // Header
        lines.push(format!(
            "{:<plu_width$}  {:<price_width$}  {:<old_width$}  {:<disc_width$}  {}",
            "PLU", "Price", "Old price", "Disc", "Title"
        ));
        lines.push(format!(
            "{:-<plu_width$}  {:-<price_width$}  {:-<old_width$}  {:-<disc_width$}  {:-<title_width$}",
            "", "", "", "", ""
        ));

        // Rows
        for product in products {
            let old_str = match product.old_price {
                Some(old) => group_thousands(old),
                None => "-".to_string(),
            };

            let disc_str = product.discount.as_deref().unwrap_or("-");

            let mut title = truncate(&product.title, title_width);
            if product.is_flash_sale {
                title.push_str(" [flash]");
            }

            lines.push(format!(
                "{:<plu_width$}  {:>price_width$}  {:>old_width$}  {:<disc_width$}  {}",
                product.plu,
                group_thousands(product.price),
                old_str,
                disc_str,
                title
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", products.len()));

        lines.join("\n")
    }

    fn table_categories(&self, categories: &[SuperCategory]) -> String {
        let mut lines = Vec::new();

        for group in categories {
            lines.push(format!("{} ({} categories)", group.name, group.categories.len()));

            for category in &group.categories {
                lines.push(format!("  {}  ->  {}", category.name, category.link));

                for sub in category.subcategories.iter().flatten() {
                    lines.push(format!("    - {}", sub));
                }
            }

            lines.push(String::new());
        }

        lines.push(format!("Total: {} super-categories", categories.len()));
        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();

        lines.push("| PLU | Price | Old price | Disc | Flash | Title |".to_string());
        lines.push("|-----|-------|-----------|------|-------|-------|".to_string());

        for product in products {
            let old_str = match product.old_price {
                Some(old) => group_thousands(old),
                None => String::new(),
            };

            let flash_str = if product.is_flash_sale { "✓" } else { "" };

            lines.push(format!(
                "| {} | {} | {} | {} | {} | [{}]({}) |",
                product.plu,
                group_thousands(product.price),
                old_str,
                product.discount.as_deref().unwrap_or(""),
                flash_str,
                truncate(&product.title, 40),
                product.link
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products found*", products.len()));

        lines.join("\n")
    }

    fn markdown_categories(&self, categories: &[SuperCategory]) -> String {
        let mut lines = Vec::new();

        for group in categories {
            lines.push(format!("## {}", group.name));
            lines.push(String::new());

            for category in &group.categories {
                lines.push(format!("- [{}]({})", category.name, category.link));

                for sub in category.subcategories.iter().flatten() {
                    lines.push(format!("  - {}", sub));
                }
            }

            lines.push(String::new());
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();
        lines.push(csv_product_header());

        for product in products {
            lines.push(
                [
                    csv_escape(&product.plu),
                    csv_escape(&product.title),
                    csv_escape(&product.category),
                    product.price.to_string(),
                    product.old_price.map(|p| p.to_string()).unwrap_or_default(),
                    csv_escape(product.discount.as_deref().unwrap_or("")),
                    product.is_discount.to_string(),
                    product.is_flash_sale.to_string(),
                    csv_escape(&product.link),
                ]
                .join(","),
            );
        }

        lines.join("\n")
    }

    fn csv_categories(&self, categories: &[SuperCategory]) -> String {
        let mut lines = Vec::new();
        lines.push(csv_category_header());

        for group in categories {
            for category in &group.categories {
                lines.push(
                    [
                        csv_escape(&group.name),
                        csv_escape(&category.name),
                        csv_escape(&category.link),
                        csv_escape(&category.subcategories.as_deref().unwrap_or(&[]).join("; ")),
                    ]
                    .join(","),
                );
            }
        }

        lines.join("\n")
    }
}

/// Stateless pretty-JSON encoding, invoked per call.
fn json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "[]".to_string())
}

fn csv_product_header() -> String {
    "plu,title,category,price,old_price,discount,is_discount,is_flash_sale,link".to_string()
}

fn csv_category_header() -> String {
    "super_category,category,link,subcategories".to_string()
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Renders a Rupiah amount with `.` thousands separators.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
