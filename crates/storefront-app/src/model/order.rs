/// One purchased product line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub sku: String,
    pub price: f64,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(sku: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            sku: sku.into(),
            price,
            quantity,
        }
    }

    pub fn amount(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// An order as seen by calculators: its lines and where it ships.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub number: String,
    pub ship_country_iso: String,
    pub line_items: Vec<LineItem>,
}

impl Order {
    /// Creates an order with no line items.
    pub fn new(number: impl Into<String>, ship_country_iso: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            ship_country_iso: ship_country_iso.into(),
            line_items: Vec::new(),
        }
    }

    /// Builder-style helper used by the demo and tests.
    pub fn with_item(mut self, sku: impl Into<String>, price: f64, quantity: u32) -> Self {
        self.line_items.push(LineItem::new(sku, price, quantity));
        self
    }

    /// Sum of line amounts before adjustments.
    pub fn item_total(&self) -> f64 {
        self.line_items.iter().map(LineItem::amount).sum()
    }

    /// Total number of units across all lines.
    pub fn quantity(&self) -> u64 {
        self.line_items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
