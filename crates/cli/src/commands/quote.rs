//! Price quote command.

use std::io::{self, Write};

use cafe_nine_core::{OrderSummary, Price};

use super::CliError;

/// Print tax, delivery, and total for a subtotal.
///
/// # Errors
///
/// Returns an error if the subtotal is not a non-negative amount.
pub fn quote(subtotal: &str) -> Result<(), CliError> {
    let summary = OrderSummary::from_subtotal(subtotal.parse::<Price>()?);
    io::stdout().lock().write_all(render(&summary).as_bytes())?;
    Ok(())
}

fn render(summary: &OrderSummary) -> String {
    let delivery = if summary.has_free_delivery() {
        "FREE".to_string()
    } else {
        summary.delivery_fee.to_string()
    };
    let mut out = format!(
        "Subtotal: {}\nTax:      {}\nDelivery: {}\nTotal:    {}\n",
        summary.subtotal, summary.tax, delivery, summary.total
    );
    if let Some(shortfall) = summary.free_delivery_shortfall {
        out.push_str(&format!("Add {shortfall} more for free delivery\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_small_order() {
        let out = render(&OrderSummary::from_subtotal(Price::from_whole(20)));
        assert!(out.contains("Tax:      $1.60"));
        assert!(out.contains("Delivery: $5.00"));
        assert!(out.contains("Total:    $26.60"));
        assert!(out.contains("Add $30.00 more"));
    }

    #[test]
    fn test_render_free_delivery() {
        let out = render(&OrderSummary::from_subtotal(Price::from_whole(60)));
        assert!(out.contains("Delivery: FREE"));
        assert!(out.contains("Total:    $64.80"));
        assert!(!out.contains("more for free delivery"));
    }
}
