//! Fixed-shape market snapshot and the lookup result built from it

use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// Marker shown for fields the provider did not return
pub const NOT_AVAILABLE: &str = "N/A";

/// A single snapshot value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Value(f64),
    NotAvailable,
}

impl FieldValue {
    /// Whether the provider supplied this field
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// The raw number, if present
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::NotAvailable => None,
        }
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Self::Value(v),
            _ => Self::NotAvailable,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// How a field is presented to people
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Price in dollars, two decimals
    Price,
    /// Whole count with thousands separators
    Count,
    /// Large dollar amount with K/M/B/T suffix
    LargeAmount,
    /// Plain ratio, two decimals
    Ratio,
    /// Fraction shown as a percentage
    Percent,
}

impl FieldKind {
    /// Format a value of this kind
    pub fn format(self, value: FieldValue) -> String {
        let Some(v) = value.as_f64() else {
            return NOT_AVAILABLE.to_string();
        };

        match self {
            Self::Price => format!("${v:.2}"),
            Self::Count => group_thousands(v.round() as i64),
            Self::LargeAmount => abbreviate_amount(v),
            Self::Ratio => format!("{v:.2}"),
            Self::Percent => format!("{:.2}%", v * 100.0),
        }
    }
}

/// Named field of a [`MarketSnapshot`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotField {
    /// Stable machine key, used in the serialized map
    pub key: &'static str,
    /// Display label
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: FieldValue,
}

impl SnapshotField {
    /// Value formatted for display
    pub fn display_value(&self) -> String {
        self.kind.format(self.value)
    }
}

/// Number of fields in every snapshot
pub const SNAPSHOT_FIELD_COUNT: usize = 7;

/// Raw quote numbers as delivered by a data source, all optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderQuote {
    pub current_price: Option<f64>,
    pub volume: Option<f64>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
}

/// Seven market fields for one symbol, created fresh on every lookup
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub fetched_at: DateTime<Utc>,
    pub current_price: FieldValue,
    pub volume: FieldValue,
    pub market_cap: FieldValue,
    pub pe_ratio: FieldValue,
    pub dividend_yield: FieldValue,
    pub fifty_two_week_high: FieldValue,
    pub fifty_two_week_low: FieldValue,
}

impl MarketSnapshot {
    /// Project a provider quote onto the fixed field set
    ///
    /// Each missing field becomes `N/A` independently of the others.
    pub fn from_quote(symbol: impl Into<String>, quote: ProviderQuote) -> Self {
        Self {
            symbol: symbol.into(),
            fetched_at: Utc::now(),
            current_price: quote.current_price.into(),
            volume: quote.volume.into(),
            market_cap: quote.market_cap.into(),
            pe_ratio: quote.pe_ratio.into(),
            dividend_yield: quote.dividend_yield.into(),
            fifty_two_week_high: quote.fifty_two_week_high.into(),
            fifty_two_week_low: quote.fifty_two_week_low.into(),
        }
    }

    /// All fields in display order
    pub fn fields(&self) -> [SnapshotField; SNAPSHOT_FIELD_COUNT] {
        use FieldKind::{Count, LargeAmount, Percent, Price, Ratio};

        [
            field("current_price", "Current Price", Price, self.current_price),
            field("volume", "Volume", Count, self.volume),
            field("market_cap", "Market Cap", LargeAmount, self.market_cap),
            field("pe_ratio", "P/E Ratio", Ratio, self.pe_ratio),
            field("dividend_yield", "Dividend Yield", Percent, self.dividend_yield),
            field("fifty_two_week_high", "52 Week High", Price, self.fifty_two_week_high),
            field("fifty_two_week_low", "52 Week Low", Price, self.fifty_two_week_low),
        ]
    }

    /// Number of fields the provider actually supplied
    pub fn available_count(&self) -> usize {
        self.fields().iter().filter(|f| f.value.is_available()).count()
    }
}

fn field(
    key: &'static str,
    label: &'static str,
    kind: FieldKind,
    value: FieldValue,
) -> SnapshotField {
    SnapshotField {
        key,
        label,
        kind,
        value,
    }
}

impl fmt::Display for MarketSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields()
            .iter()
            .map(|field| format!("{}: {}", field.label, field.display_value()))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl Serialize for MarketSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.fields();
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for field in &fields {
            map.serialize_entry(field.key, &field.value)?;
        }
        map.end()
    }
}

/// Result of a market data lookup
///
/// Serializes either to the seven snapshot fields or to `{"error": message}`.
#[derive(Debug, Clone, PartialEq)]
pub enum MarketData {
    Snapshot(MarketSnapshot),
    Error { error: String },
}

impl MarketData {
    /// Build the single-key error map
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        let error = if message.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            message
        };
        Self::Error { error }
    }

    /// The snapshot, if the lookup succeeded
    pub fn snapshot(&self) -> Option<&MarketSnapshot> {
        match self {
            Self::Snapshot(snapshot) => Some(snapshot),
            Self::Error { .. } => None,
        }
    }

    /// The error message, if the lookup failed
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Snapshot(_) => None,
            Self::Error { error } => Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Number of keys in the serialized map
    pub fn key_count(&self) -> usize {
        match self {
            Self::Snapshot(_) => SNAPSHOT_FIELD_COUNT,
            Self::Error { .. } => 1,
        }
    }
}

impl fmt::Display for MarketData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snapshot(snapshot) => write!(f, "{snapshot}"),
            Self::Error { error } => write!(f, "error: {error}"),
        }
    }
}

impl Serialize for MarketData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Snapshot(snapshot) => snapshot.serialize(serializer),
            Self::Error { error } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn abbreviate_amount(value: f64) -> String {
    const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    for (scale, suffix) in UNITS {
        if value.abs() >= scale {
            return format!("${:.2}{suffix}", value / scale);
        }
    }
    format!("${value:.2}")
}
