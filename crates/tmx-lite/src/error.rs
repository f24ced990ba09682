use std::{io, num::ParseIntError, path::PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::data::TileDataError;

/// Why a TMX map could not be loaded. Every failure aborts the whole load.
///
/// Variants raised after the document was read carry the document text and a
/// label on the offending element, so they render as a full report through
/// [`miette`].
#[derive(Debug, Error, Diagnostic)]
pub enum MapParseError {
    #[error("TMX file not found: {}", .path.display())]
    #[diagnostic(code(tmx::missing_file))]
    MissingFile { path: PathBuf },

    #[error("failed to read TMX file {}", .path.display())]
    #[diagnostic(code(tmx::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse TMX: {error}")]
    #[diagnostic(code(tmx::xml))]
    MalformedXml {
        error: roxmltree::Error,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
    },

    #[error("TMX missing <tileset> definition")]
    #[diagnostic(code(tmx::missing_tileset), help("add a <tileset> element to the map"))]
    MissingTileset {
        #[source_code]
        src: NamedSource<String>,
        #[label("map has no tileset")]
        span: SourceSpan,
    },

    #[error("invalid value '{value}' for map attribute '{attribute}'")]
    #[diagnostic(code(tmx::invalid_attribute))]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a non-negative integer")]
        span: SourceSpan,
    },

    #[error("layer '{layer}' missing data")]
    #[diagnostic(code(tmx::missing_layer_data))]
    MissingLayerData {
        layer: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("layer without tile data")]
        span: SourceSpan,
    },

    #[error("layer '{layer}' uses unsupported data encoding '{encoding}'")]
    #[diagnostic(code(tmx::unsupported_encoding), help("save the map with CSV layer format"))]
    UnsupportedEncoding {
        layer: String,
        encoding: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("only csv is supported")]
        span: SourceSpan,
    },

    #[error("invalid tile id in layer '{layer}'")]
    #[diagnostic(code(tmx::invalid_tile_id))]
    InvalidTileId {
        layer: String,
        #[source]
        source: TileDataError,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a tile id")]
        span: SourceSpan,
    },

    #[error("invalid property without name or value")]
    #[diagnostic(code(tmx::invalid_property))]
    InvalidProperty {
        #[source_code]
        src: NamedSource<String>,
        #[label("needs both name and value")]
        span: SourceSpan,
    },
}
