//! Terminal rendering: status lines, notices, product tables.
//!
//! With `--json` every human-oriented line is suppressed and only data
//! (products, notices, errors) is printed, one JSON document at a time.

use catalog_core::{Notice, NoticeLevel, Pagination, Product};
use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Column widths of the product table: id, name, price.
const TABLE_WIDTHS: [usize; 3] = [24, 32, 16];

#[derive(Debug, Clone, Copy)]
enum Tone {
    Info,
    Success,
    Warning,
    Failure,
    Trace,
}

impl Tone {
    fn marker(self) -> StyledObject<&'static str> {
        match self {
            Tone::Info => style("ℹ").blue(),
            Tone::Success => style("✓").green(),
            Tone::Warning => style("⚠").yellow(),
            Tone::Failure => style("✗").red(),
            Tone::Trace => style("→").dim(),
        }
    }

    /// Warnings and worse go to stderr with the tracing output.
    fn to_stderr(self) -> bool {
        matches!(self, Tone::Warning | Tone::Failure | Tone::Trace)
    }
}

/// Where command results and messages are written.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn emit(&self, tone: Tone, msg: &str) {
        if self.json {
            return;
        }
        let body = match tone {
            Tone::Failure => style(msg).red().to_string(),
            Tone::Trace => style(msg).dim().to_string(),
            _ => msg.to_string(),
        };
        if tone.to_stderr() {
            eprintln!("{} {}", tone.marker(), body);
        } else {
            println!("{} {}", tone.marker(), body);
        }
    }

    pub fn info(&self, msg: &str) {
        self.emit(Tone::Info, msg);
    }

    pub fn success(&self, msg: &str) {
        self.emit(Tone::Success, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.emit(Tone::Warning, msg);
    }

    /// Errors are still reported in JSON mode, as `{"error": ...}` on stderr.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            self.emit(Tone::Failure, msg);
        }
    }

    /// Only with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.emit(Tone::Trace, msg);
        }
    }

    /// A question for the user. Always shown, on stderr, so JSON on stdout
    /// stays parseable.
    pub fn prompt(&self, msg: &str) {
        eprintln!("{} {}", style("?").cyan().bold(), msg);
    }

    pub fn header(&self, msg: &str) {
        if !self.json {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    /// Show a notice at its level.
    pub fn notice(&self, notice: &Notice) {
        if self.json {
            self.json(notice);
            return;
        }
        match notice.level {
            NoticeLevel::Success => self.success(&notice.to_line()),
            NoticeLevel::Warning => self.warn(&notice.to_line()),
            NoticeLevel::Error => self.error(&notice.to_line()),
        }
    }

    /// Pretty-printed JSON on stdout.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{}", text),
            Err(e) => tracing::warn!(error = %e, "could not serialize output"),
        }
    }

    /// Indented `label value` line.
    pub fn field(&self, label: &str, value: &str) {
        println!("  {:<10} {}", style(label).dim(), value);
    }

    fn row(&self, cells: [&str; 3]) {
        let line: Vec<String> = cells
            .iter()
            .zip(TABLE_WIDTHS)
            .map(|(cell, width)| format!("{:<width$}", truncate(cell, width)))
            .collect();
        println!("  {}", line.join("  ").trim_end());
    }

    /// Print a page of products with its pagination footer.
    pub fn product_page(&self, products: &[Product], pagination: &Pagination) {
        if self.json {
            self.json(&serde_json::json!({
                "products": products,
                "page": pagination.page,
                "pages": pagination.total_pages,
            }));
            return;
        }

        if products.is_empty() {
            self.info("No products found.");
        } else {
            println!();
            self.row(["ID", "NAME", "PRICE"]);
            for product in products {
                let price = product.display_price();
                self.row([product.id.as_str(), &product.name, &price]);
            }
        }

        println!();
        println!(
            "  {}{}{}",
            if pagination.has_previous() { "< prev  " } else { "" },
            style(pagination.label()).bold(),
            if pagination.has_next() { "  next >" } else { "" },
        );
    }

    /// Print a single product.
    pub fn product(&self, product: &Product) {
        if self.json {
            self.json(product);
            return;
        }
        self.header(&product.name);
        self.field("id", product.id.as_str());
        self.field("price", &product.display_price());
        self.field("image", &product.image_url);
    }

    /// Spinner shown while a request is in flight; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner().with_message(msg.to_string());
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(template);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

/// Cut `text` to at most `width` characters, marking the cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}
