//! Output formatting for the CLI.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use shelf_commerce::{Currency, Money, Product};
use shelf_screens::{SyncReport, WriteOutcome};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print how a favorite write went on each side.
    pub fn sync_report(&self, report: &SyncReport) {
        if self.json {
            return;
        }
        let action = if report.status { "Favorited" } else { "Unfavorited" };
        if report.is_synced() {
            self.success(&format!("{} {}", action, report.product_id));
            return;
        }
        self.warn(&format!("{} {} only partially", action, report.product_id));
        self.kv("catalog", &outcome_label(&report.remote));
        self.kv("device", &outcome_label(&report.local));
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Heart marker for the favorite flag.
pub fn favorite_marker(is_favorite: bool) -> String {
    if is_favorite {
        style("♥").red().to_string()
    } else {
        style("♡").dim().to_string()
    }
}

/// Price column: the discounted price, with the list price and percent when
/// a deal applies.
pub fn price_label(list: Money, discounted: Money, percent: u32) -> String {
    if percent == 0 {
        return list.display();
    }
    format!(
        "{} {} {}",
        style(discounted.display()).green(),
        style(list.display()).dim().strikethrough(),
        style(format!("-{}%", percent)).yellow()
    )
}

/// Plain price column used in tables, where styling would break alignment.
pub fn plain_price(money: Money, currency: Currency) -> String {
    format!("{} {}", money.display_amount(), currency.code())
}

/// Shown under a product that has no feedback.
pub const NO_REVIEWS: &str = "No reviews yet";

/// Heading of the feedback section, with the average rating. `None` when
/// the product has no feedback.
pub fn feedback_heading(product: &Product) -> Option<String> {
    let average = product.average_rating()?;
    Some(format!("Feedback (avg {:.1})", average))
}

fn outcome_label(outcome: &WriteOutcome) -> String {
    match outcome {
        WriteOutcome::Applied => style("applied").green().to_string(),
        WriteOutcome::Skipped => style("skipped").dim().to_string(),
        WriteOutcome::Failed(e) => style(format!("failed: {}", e)).red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_label_without_deal() {
        let price = Money::from_decimal(12.5, Currency::USD);
        assert_eq!(price_label(price, price, 0), price.display());
    }

    #[test]
    fn test_price_label_with_deal_mentions_percent() {
        console::set_colors_enabled(false);
        let list = Money::from_decimal(100.0, Currency::USD);
        let discounted = Money::from_decimal(80.0, Currency::USD);
        let label = price_label(list, discounted, 20);
        assert!(label.contains("-20%"));
        assert!(label.contains("80.00"));
    }

    #[test]
    fn test_feedback_heading() {
        let quiet = Product::new("1", "Abcart", 10.0);
        assert_eq!(feedback_heading(&quiet), None);

        let reviewed = quiet
            .with_feedback(shelf_commerce::Feedback::new("Ann", "Great", 5.0))
            .with_feedback(shelf_commerce::Feedback::new("Bo", "Fine", 4.0));
        assert_eq!(
            feedback_heading(&reviewed).as_deref(),
            Some("Feedback (avg 4.5)")
        );
    }

    #[test]
    fn test_plain_price() {
        assert_eq!(
            plain_price(Money::from_decimal(80.0, Currency::USD), Currency::USD),
            "80.00 USD"
        );
    }
}
