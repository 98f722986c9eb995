//! Plain-text rendering of the cart for the terminal.

use std::fmt::Write;

use rocketshoes_core::{Cart, Money};

const TITLE_WIDTH: usize = 32;

/// Renders the cart as a table followed by its totals.
///
/// ```text
///   #3    Tenis de Caminhada Leve Confortavel   2 x $179.90     $359.80
///   ...
///   2 product(s), 3 unit(s)                               Total $539.70
/// ```
pub fn cart_table(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::new();
    for item in cart {
        let _ = writeln!(
            out,
            "  {:<5} {:<width$} {:>3} x {:>10} {:>12}",
            format!("#{}", item.id),
            truncate(item.title().unwrap_or("(untitled)"), TITLE_WIDTH),
            item.amount,
            money_or_dash(item.price()),
            money_or_dash(item.subtotal()),
            width = TITLE_WIDTH,
        );
    }

    let totals = cart.totals();
    let summary = format!(
        "{} product(s), {} unit(s)",
        totals.item_count, totals.total_quantity
    );
    let _ = writeln!(
        out,
        "  {:<52} Total {:>10}",
        summary,
        totals.subtotal.to_string()
    );
    out
}

fn money_or_dash(value: Option<Money>) -> String {
    value.map_or_else(|| "-".to_string(), |money| money.to_string())
}

fn truncate(title: &str, width: usize) -> String {
    if title.chars().count() <= width {
        return title.to_string();
    }
    let mut short: String = title.chars().take(width - 1).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocketshoes_core::{LineItem, Product, ProductId};

    fn item(id: u32, title: &str, cents: i64, amount: u32) -> LineItem {
        let product = Product::new(ProductId::new(id))
            .with_attribute("title", title)
            .with_attribute("price", Money::from_cents(cents).to_decimal());
        LineItem::from_product(&product, amount)
    }

    #[test]
    fn test_empty_cart() {
        assert_eq!(cart_table(&Cart::new()), "Cart is empty\n");
    }

    #[test]
    fn test_table_lists_lines_in_order_with_total() {
        let cart = Cart::from_items(vec![
            item(3, "Tenis de Caminhada", 17990, 2),
            item(1, "Tenis Basico", 9990, 1),
        ])
        .unwrap();

        let table = cart_table(&cart);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("#3"));
        assert!(lines[0].contains("$359.80"));
        assert!(lines[1].contains("#1"));
        assert!(lines[2].contains("2 product(s), 3 unit(s)"));
        assert!(lines[2].ends_with("$459.70"));
    }

    #[test]
    fn test_lines_without_title_or_price() {
        let bare = LineItem::from_product(&Product::new(ProductId::new(8)), 2);
        let table = cart_table(&Cart::from_items(vec![bare]).unwrap());

        let first = table.lines().next().unwrap();
        assert!(first.contains("(untitled)"));
        assert!(first.trim_end().ends_with('-'));
        assert!(table.lines().last().unwrap().ends_with("$0.00"));
    }

    #[test]
    fn test_long_titles_are_truncated() {
        let long = "x".repeat(40);
        let short = truncate(&long, TITLE_WIDTH);
        assert_eq!(short.chars().count(), TITLE_WIDTH);
        assert!(short.ends_with('…'));
        assert_eq!(truncate("Tenis", TITLE_WIDTH), "Tenis");
    }
}
