//! Guest cart store
//!
//! Tab-scoped mutable list of selected menu lines. Single UI writer, so a
//! plain `RwLock` is enough; every mutation notifies subscribers
//! synchronously (event broadcast via callback) so badge counters and the
//! checkout sheet stay consistent without polling the store.
//!
//! Merge policy: adding an input whose product, variant, options and note
//! all match an existing line increments that line's quantity instead of
//! appending a duplicate entry.

use std::sync::Arc;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::models::{ProductOption, Variant};
use uuid::Uuid;

use crate::config::{ClientConfig, DEFAULT_TAX_RATE};
use crate::money::{round_money, to_decimal};

/// Cart line item with its resolved unit price
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub line_id: Uuid,
    pub product_id: String,
    pub name: String,
    /// Variant price plus summed option surcharges
    pub unit_price: Decimal,
    /// Always >= 1; dropping below 1 removes the line instead
    pub quantity: i32,
    pub variant: String,
    pub options: Vec<String>,
    pub note: Option<String>,
    pub image: Option<String>,
}

impl CartItem {
    /// Line total: unit price times quantity
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Input from the product dialog's "add to cart" confirmation
#[derive(Debug, Clone)]
pub struct CartItemInput {
    pub product_id: String,
    pub name: String,
    pub variant: Variant,
    pub options: Vec<ProductOption>,
    pub quantity: i32,
    pub note: Option<String>,
    pub image: Option<String>,
}

impl CartItemInput {
    /// Resolve the unit price: variant price + option surcharges
    pub fn unit_price(&self) -> Decimal {
        self.options
            .iter()
            .fold(to_decimal(self.variant.price), |acc, opt| {
                acc + to_decimal(opt.surcharge)
            })
    }
}

/// Store mutation events delivered to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    ItemAdded { line_id: Uuid },
    ItemRemoved { line_id: Uuid },
    QuantityChanged { line_id: Uuid, quantity: i32 },
    Cleared,
}

type Subscriber = Box<dyn Fn(&CartEvent) + Send + Sync>;

struct CartInner {
    tax_rate: Decimal,
    items: RwLock<Vec<CartItem>>,
    subscribers: RwLock<Vec<Subscriber>>,
}

/// Cart store handle; clones share the same underlying cart
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartInner>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Create an empty cart with the default tax rate
    pub fn new() -> Self {
        Self::with_tax_rate(DEFAULT_TAX_RATE)
    }

    /// Create an empty cart taxed at the configured rate
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_tax_rate(config.tax_rate)
    }

    /// Create an empty cart with a specific tax rate
    pub fn with_tax_rate(tax_rate: Decimal) -> Self {
        Self {
            inner: Arc::new(CartInner {
                tax_rate,
                items: RwLock::new(Vec::new()),
                subscribers: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Register a subscriber; called synchronously on every mutation
    pub fn subscribe(&self, f: impl Fn(&CartEvent) + Send + Sync + 'static) {
        self.inner.subscribers.write().push(Box::new(f));
    }

    fn notify(&self, event: CartEvent) {
        for subscriber in self.inner.subscribers.read().iter() {
            subscriber(&event);
        }
    }

    /// Add a line; merges into an existing line when product, variant,
    /// options and note all match. Returns the affected line id.
    pub fn add(&self, input: CartItemInput) -> Uuid {
        let quantity = input.quantity.max(1);
        let unit_price = input.unit_price();
        let option_labels: Vec<String> =
            input.options.iter().map(|o| o.name.clone()).collect();

        let event;
        let line_id;
        {
            let mut items = self.inner.items.write();
            if let Some(existing) = items.iter_mut().find(|item| {
                item.product_id == input.product_id
                    && item.variant == input.variant.name
                    && same_options(&item.options, &option_labels)
                    && item.note == input.note
            }) {
                existing.quantity += quantity;
                line_id = existing.line_id;
                event = CartEvent::QuantityChanged {
                    line_id,
                    quantity: existing.quantity,
                };
            } else {
                line_id = Uuid::new_v4();
                items.push(CartItem {
                    line_id,
                    product_id: input.product_id,
                    name: input.name,
                    unit_price,
                    quantity,
                    variant: input.variant.name,
                    options: option_labels,
                    note: input.note,
                    image: input.image,
                });
                event = CartEvent::ItemAdded { line_id };
            }
        }

        tracing::debug!(%line_id, "cart line added");
        self.notify(event);
        line_id
    }

    /// Remove a line; no-op when the id is absent
    pub fn remove(&self, line_id: Uuid) {
        let removed = {
            let mut items = self.inner.items.write();
            let before = items.len();
            items.retain(|item| item.line_id != line_id);
            items.len() != before
        };

        if removed {
            self.notify(CartEvent::ItemRemoved { line_id });
        }
    }

    /// Replace a line's quantity; silently ignores `quantity < 1` and
    /// unknown line ids
    pub fn set_quantity(&self, line_id: Uuid, quantity: i32) {
        if quantity < 1 {
            return;
        }

        let changed = {
            let mut items = self.inner.items.write();
            match items.iter_mut().find(|item| item.line_id == line_id) {
                Some(item) => {
                    item.quantity = quantity;
                    true
                }
                None => false,
            }
        };

        if changed {
            self.notify(CartEvent::QuantityChanged { line_id, quantity });
        }
    }

    /// Quantity "+" control
    pub fn increment(&self, line_id: Uuid) {
        let new_quantity = self
            .inner
            .items
            .read()
            .iter()
            .find(|item| item.line_id == line_id)
            .map(|item| item.quantity + 1);
        if let Some(q) = new_quantity {
            self.set_quantity(line_id, q);
        }
    }

    /// Quantity "-" control: removing the last unit removes the line
    pub fn decrement(&self, line_id: Uuid) {
        let current = self
            .inner
            .items
            .read()
            .iter()
            .find(|item| item.line_id == line_id)
            .map(|item| item.quantity);
        match current {
            Some(1) => self.remove(line_id),
            Some(q) => self.set_quantity(line_id, q - 1),
            None => {}
        }
    }

    /// Snapshot of the current lines
    pub fn items(&self) -> Vec<CartItem> {
        self.inner.items.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.read().is_empty()
    }

    /// Sum of all line quantities (drives the cart badge)
    pub fn total_quantity(&self) -> i32 {
        self.inner.items.read().iter().map(|item| item.quantity).sum()
    }

    /// Badge text, capped at a presentation threshold ("10+" above 10)
    pub fn badge_label(&self, cap: i32) -> String {
        let quantity = self.total_quantity();
        if quantity > cap {
            format!("{}+", cap)
        } else {
            quantity.to_string()
        }
    }

    /// Sum of line totals
    pub fn subtotal(&self) -> Decimal {
        self.inner
            .items
            .read()
            .iter()
            .map(CartItem::line_total)
            .sum()
    }

    /// Tax on the subtotal, rounded to money precision
    pub fn tax(&self) -> Decimal {
        round_money(self.subtotal() * self.inner.tax_rate)
    }

    /// Subtotal plus tax
    pub fn total(&self) -> Decimal {
        self.subtotal() + self.tax()
    }

    /// Drop every line (successful checkout)
    pub fn clear(&self) {
        let was_empty = {
            let mut items = self.inner.items.write();
            let was_empty = items.is_empty();
            items.clear();
            was_empty
        };
        if !was_empty {
            self.notify(CartEvent::Cleared);
        }
    }
}

/// Order-insensitive option comparison
fn same_options(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a_sorted = a.to_vec();
    let mut b_sorted = b.to_vec();
    a_sorted.sort();
    b_sorted.sort();
    a_sorted == b_sorted
}
