//! CSV tile data: the text body of a `<data encoding="csv">` element.
//!
//! Tiled writes one row per line with a trailing comma on every row but the
//! last, so both commas and line breaks separate cells here. Blank cells are
//! skipped rather than read as tile 0.

use std::{num::ParseIntError, ops::Range};

use thiserror::Error;
use winnow::{
    combinator::separated,
    prelude::*,
    token::{one_of, take_till},
    Located,
};

/// A raw cell and its byte range within the data text.
pub type Token<'s> = (&'s str, Range<usize>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileDataError {
    #[error("'{token}' is not a tile id")]
    InvalidId {
        token: String,
        /// Byte range of the trimmed token within the data text.
        span: Range<usize>,
        #[source]
        source: ParseIntError,
    },
    #[error("malformed tile data at offset {offset}")]
    Syntax { offset: usize },
}

pub fn parse_token<'s>(i: &mut Located<&'s str>) -> PResult<Token<'s>> {
    take_till(0.., (',', '\n', '\r'))
        .with_span()
        .parse_next(i)
}

pub fn parse_tokens<'s>(i: &mut Located<&'s str>) -> PResult<Vec<Token<'s>>> {
    separated(0.., parse_token, one_of((',', '\n', '\r'))).parse_next(i)
}

/// Parses the whole data text into raw global tile ids.
pub fn parse_tile_data(text: &str) -> Result<Vec<u32>, TileDataError> {
    let tokens = parse_tokens
        .parse(Located::new(text))
        .map_err(|e| TileDataError::Syntax { offset: e.offset() })?;

    tokens
        .into_iter()
        .filter_map(|(token, span)| {
            let trimmed = token.trim();
            if trimmed.is_empty() {
                return None;
            }
            let start = span.start + (token.len() - token.trim_start().len());
            Some(
                trimmed
                    .parse::<u32>()
                    .map_err(|source| TileDataError::InvalidId {
                        token: trimmed.to_owned(),
                        span: start..start + trimmed.len(),
                        source,
                    }),
            )
        })
        .collect()
}
