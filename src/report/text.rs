//! Text rendering and chunk packing
//!
//! Each outcome renders to one block. Blocks are packed greedily into
//! chunks that fit the delivery channel's message size budget.

use crate::prober::ProbeOutcome;
use crate::report::classify::classify;
use crate::url::display_host;

/// Separator placed between blocks inside a chunk and in the text artifact
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Characters budgeted for the separator after each block
const SEPARATOR_OVERHEAD: usize = 2;

/// Longest product title shown in a block, in characters
pub const MAX_TITLE_CHARS: usize = 60;

/// Renders one outcome as a text block
///
/// ```text
/// ✅ shop.example.com
/// Shopify: Yes
/// Currency: $
/// Products:
/// • Tee — $19.99–$24.99
/// ```
pub fn render_block(outcome: &ProbeOutcome, sample_limit: usize) -> String {
    let classification = classify(outcome);
    let mut lines = vec![
        format!(
            "{} {}",
            classification.icon.as_str(),
            display_host(outcome.target())
        ),
        format!("Shopify: {}", classification.storefront_label),
        format!("Currency: {}", outcome.currency_symbol()),
    ];

    if outcome.is_storefront() {
        lines.push("Products:".to_string());
        for product in outcome.products().iter().take(sample_limit) {
            lines.push(format!(
                "• {} — {}",
                truncate_title(&product.title),
                product.price_range
            ));
        }
    }

    lines.join("\n")
}

/// Truncates a title to [`MAX_TITLE_CHARS`] characters
pub fn truncate_title(title: &str) -> &str {
    match title.char_indices().nth(MAX_TITLE_CHARS) {
        Some((byte_index, _)) => &title[..byte_index],
        None => title,
    }
}

/// A group of whole blocks delivered as one message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    pub blocks: Vec<String>,
}

impl Chunk {
    /// The message text: blocks joined by [`BLOCK_SEPARATOR`]
    pub fn text(&self) -> String {
        self.blocks.join(BLOCK_SEPARATOR)
    }

    /// Length of [`Chunk::text`] in characters
    pub fn char_len(&self) -> usize {
        let content: usize = self.blocks.iter().map(|b| b.chars().count()).sum();
        content + SEPARATOR_OVERHEAD * self.blocks.len().saturating_sub(1)
    }
}

/// Packs blocks into chunks of at most `budget` characters
///
/// A new chunk starts whenever adding the next block plus the separator
/// overhead would exceed the budget. Blocks are never split, so a block
/// longer than the budget occupies a chunk of its own. Flattening the
/// chunks yields the input blocks in order.
pub fn pack_chunks<I>(blocks: I, budget: usize) -> Vec<Chunk>
where
    I: IntoIterator<Item = String>,
{
    let mut chunks = Vec::new();
    let mut current = Vec::new();
    let mut size = 0;

    for block in blocks {
        let len = block.chars().count();
        if !current.is_empty() && size + len + SEPARATOR_OVERHEAD > budget {
            chunks.push(Chunk {
                blocks: std::mem::take(&mut current),
            });
            size = 0;
        }
        size += len + SEPARATOR_OVERHEAD;
        current.push(block);
    }

    if !current.is_empty() {
        chunks.push(Chunk { blocks: current });
    }

    chunks
}
