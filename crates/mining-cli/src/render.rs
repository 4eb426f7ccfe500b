//! Terminal rendering of replies, snapshots and history

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use mining_agent::MarketData;
use mining_core::{ChatRole, ConversationHistory};

/// Tiles per table row
const TILES_PER_ROW: usize = 4;

const FETCHED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Snapshot as a grid of metric tiles, or a single error tile
pub fn market_tiles(symbol: &str, data: &MarketData) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    match data.snapshot() {
        Some(snapshot) => {
            table.set_header(vec![
                Cell::new(format!("Market data for {symbol}")).add_attribute(Attribute::Bold),
            ]);
            let fields = snapshot.fields();
            for row in fields.chunks(TILES_PER_ROW) {
                table.add_row(
                    row.iter()
                        .map(|field| {
                            Cell::new(format!("{}\n{}", field.label, field.display_value()))
                        })
                        .collect::<Vec<_>>(),
                );
            }
            table.add_row(vec![Cell::new(format!(
                "Fetched at {}",
                snapshot.fetched_at.format(FETCHED_AT_FORMAT)
            ))]);
        }
        None => {
            table.set_header(vec![Cell::new(format!("Market data for {symbol}"))]);
            table.add_row(vec![Cell::new(format!(
                "error: {}",
                data.error_message().unwrap_or_default()
            ))]);
        }
    }

    table
}

/// A chat turn, continuation lines indented under the speaker
pub fn bubble(role: ChatRole, text: &str) -> String {
    let label = format!("{role}> ");
    let indent = " ".repeat(label.len());

    let mut out = String::new();
    for (i, line) in text.lines().enumerate() {
        if i == 0 {
            out.push_str(&label);
        } else {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    if out.is_empty() {
        out.push_str(label.trim_end());
    }
    out
}

/// Whole conversation as bubbles
pub fn history(history: &ConversationHistory) -> String {
    if history.is_empty() {
        return "(no messages yet)".to_string();
    }
    history
        .iter()
        .map(|entry| bubble(entry.role, &entry.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mining_agent::MarketSnapshot;
    use mining_agent::market::ProviderQuote;

    #[test]
    fn test_bubble_indents_continuation_lines() {
        assert_eq!(
            bubble(ChatRole::Assistant, "Copper is tight.\nWatch Chile."),
            "assistant> Copper is tight.\n           Watch Chile."
        );
        assert_eq!(bubble(ChatRole::User, "Hi"), "user> Hi");
        assert_eq!(bubble(ChatRole::User, ""), "user>");
    }

    #[test]
    fn test_history_rendering() {
        let mut conversation = ConversationHistory::new();
        assert_eq!(history(&conversation), "(no messages yet)");

        conversation.record_exchange("Gold?", "Steady.");
        assert_eq!(history(&conversation), "user> Gold?\n\nassistant> Steady.");
    }

    #[test]
    fn test_error_tile() {
        let data = MarketData::error("No market data found for symbol ZZZZ");
        let rendered = market_tiles("ZZZZ", &data).to_string();
        assert!(rendered.contains("error: No market data found for symbol ZZZZ"));
        assert!(!rendered.contains("Fetched at"));
    }

    #[test]
    fn test_snapshot_tiles_show_fetch_time() {
        let quote = ProviderQuote {
            current_price: Some(63.1),
            ..ProviderQuote::default()
        };
        let snapshot = MarketSnapshot::from_quote("RIO", quote);
        let fetched = snapshot.fetched_at.format(FETCHED_AT_FORMAT).to_string();

        let rendered = market_tiles("RIO", &MarketData::Snapshot(snapshot)).to_string();
        assert!(rendered.contains("Current Price"));
        assert!(rendered.contains("$63.10"));
        assert!(rendered.contains("N/A"));
        assert!(rendered.contains(&format!("Fetched at {fetched}")));
    }
}
