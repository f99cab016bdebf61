// ABOUTME: Converts Notion block sequences to a linear Markdown body
// ABOUTME: Flattens rich text runs and dispatches on block kind

use crate::model::{Block, RichText};

/// Concatenates the raw content of each run, dropping all styling.
pub fn flatten(runs: &[RichText]) -> String {
    runs.iter().map(RichText::content).collect()
}

pub fn convert_block(block: &Block) -> String {
    match block {
        Block::Paragraph { paragraph } => format!("{}\n\n", flatten(&paragraph.rich_text)),
        Block::Heading1 { heading_1 } => format!("# {}\n\n", flatten(&heading_1.rich_text)),
        Block::Heading2 { heading_2 } => format!("## {}\n\n", flatten(&heading_2.rich_text)),
        Block::Heading3 { heading_3 } => format!("### {}\n\n", flatten(&heading_3.rich_text)),
        Block::BulletedListItem { bulleted_list_item } => {
            format!("- {}\n", flatten(&bulleted_list_item.rich_text))
        }
        // Numbering is left to the Markdown renderer
        Block::NumberedListItem { numbered_list_item } => {
            format!("1. {}\n", flatten(&numbered_list_item.rich_text))
        }
        Block::Code { code } => {
            format!("```{}\n{}\n```\n\n", code.language, flatten(&code.rich_text))
        }
        Block::Unsupported => String::new(),
    }
}

pub fn convert_document(blocks: &[Block]) -> String {
    blocks.iter().map(convert_block).collect()
}
