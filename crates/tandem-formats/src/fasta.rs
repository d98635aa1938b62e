use nom::{
    bytes::complete::take_till,
    character::complete::char,
    combinator::all_consuming,
    multi::separated_list1,
    sequence::preceded,
    Finish, IResult,
};
use tandem_core::Target;

use crate::ParseError;

pub const HEADER_SENTINEL: char = '>';
pub const FIELD_DELIMITER: char = '|';

/// Parsed header line: `>chain_id|entity_type[|reference]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSpec {
    pub chain_id: String,
    pub entity_type: String,
    /// Optional third field, typically a path to an alignment file.
    pub reference: Option<String>,
}

/// One header plus the sequence lines that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceBlock {
    pub header: HeaderSpec,
    /// 1-based line number of the header.
    pub line: usize,
    pub lines: Vec<String>,
}

impl SequenceBlock {
    /// Sequence lines joined without separators.
    pub fn sequence(&self) -> String {
        self.lines.concat()
    }
}

fn header_fields(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(preceded(
        char(HEADER_SENTINEL),
        separated_list1(char(FIELD_DELIMITER), take_till(|c: char| c == FIELD_DELIMITER)),
    ))(input)
}

/// Parse a single header line. `line` is only used for error reporting.
pub fn parse_header(input: &str, line: usize) -> Result<HeaderSpec, ParseError> {
    let format_error = |message: String| ParseError::Format { line, message };

    let (_, fields) = header_fields(input.trim())
        .finish()
        .map_err(|_| format_error(format!("malformed header '{}'", input.trim())))?;
    let fields: Vec<&str> = fields.into_iter().map(str::trim).collect();

    if !(2..=3).contains(&fields.len()) {
        return Err(format_error(format!(
            "expected 2 or 3 '{}'-separated header fields, found {}",
            FIELD_DELIMITER,
            fields.len()
        )));
    }
    if fields[0].is_empty() {
        return Err(format_error("empty chain id".to_string()));
    }
    if fields[1].is_empty() {
        return Err(format_error("empty entity type".to_string()));
    }

    Ok(HeaderSpec {
        chain_id: fields[0].to_string(),
        entity_type: fields[1].to_string(),
        reference: fields
            .get(2)
            .filter(|r| !r.is_empty())
            .map(|r| r.to_string()),
    })
}

/// Split raw text into one block per chain, in file order.
///
/// Blank lines and `;` comment lines are skipped. Every block must carry at
/// least one sequence line, and no sequence line may precede the first header.
pub fn split_blocks(input: &str) -> Result<Vec<SequenceBlock>, ParseError> {
    let mut blocks = Vec::new();
    let mut current: Option<SequenceBlock> = None;

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if line.starts_with(HEADER_SENTINEL) {
            if let Some(block) = current.take() {
                blocks.push(finish_block(block)?);
            }
            current = Some(SequenceBlock {
                header: parse_header(line, line_no)?,
                line: line_no,
                lines: Vec::new(),
            });
        } else {
            match current.as_mut() {
                Some(block) => block.lines.push(line.to_string()),
                None => {
                    return Err(ParseError::Format {
                        line: line_no,
                        message: "sequence data before the first header".to_string(),
                    })
                }
            }
        }
    }

    // Don't forget the last block
    if let Some(block) = current {
        blocks.push(finish_block(block)?);
    }

    if blocks.is_empty() {
        return Err(ParseError::Empty);
    }

    Ok(blocks)
}

fn finish_block(block: SequenceBlock) -> Result<SequenceBlock, ParseError> {
    if block.lines.is_empty() {
        return Err(ParseError::Format {
            line: block.line,
            message: format!("chain '{}' has no sequence", block.header.chain_id),
        });
    }
    Ok(block)
}

/// Serialize a target back to the header-plus-sequence format.
pub fn serialize(target: &Target) -> String {
    let mut out = String::new();

    for (sequence, info) in target.sequences.iter().zip(&target.record.chains) {
        // Header
        out.push(HEADER_SENTINEL);
        out.push_str(&info.chain_name);
        out.push(FIELD_DELIMITER);
        out.push_str(&info.entity_type);
        if let Some(msa) = &info.msa_id {
            out.push(FIELD_DELIMITER);
            out.push_str(msa);
        }
        out.push('\n');

        // Sequence in 80-character lines
        let residues: Vec<char> = sequence.chars().collect();
        for chunk in residues.chunks(80) {
            out.extend(chunk);
            out.push('\n');
        }
    }

    out
}
