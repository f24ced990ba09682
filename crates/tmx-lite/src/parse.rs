//! Walks a TMX document into [`MapData`].

use std::{collections::HashMap, ops::Range};

use miette::{NamedSource, SourceSpan};
use roxmltree::{Document, Node, ParsingOptions, TextPos};
use tracy_full::zone;

use crate::{
    data::{parse_tile_data, TileDataError},
    error::MapParseError,
    map::{MapData, TileLayer},
};

/// The document text plus the name it is reported under.
struct Input<'a> {
    name: &'a str,
    text: &'a str,
}

impl Input<'_> {
    fn named(&self) -> NamedSource<String> {
        NamedSource::new(self.name, self.text.to_owned())
    }

    /// `<tag ...>` of `node`, without its children.
    fn start_tag(&self, node: Node) -> Range<usize> {
        let range = node.range();
        match self.text[range.start..].find('>') {
            Some(end) => range.start..range.start + end + 1,
            None => range,
        }
    }

    /// The raw value of `attribute` inside the start tag of `node`, falling
    /// back to the whole start tag.
    fn attribute_span(&self, node: Node, attribute: &str) -> SourceSpan {
        let tag = self.start_tag(node);
        let value = self.text[tag.clone()]
            .match_indices(attribute)
            .find_map(|(i, _)| {
                let name_start = tag.start + i;
                if !self.text[..name_start].ends_with(char::is_whitespace) {
                    return None;
                }
                let rest = &self.text[name_start + attribute.len()..tag.end];
                let quoted = rest.trim_start().strip_prefix('=')?.trim_start();
                let quote = quoted.chars().next().filter(|c| matches!(c, '"' | '\''))?;
                let value_start = tag.end - quoted.len() + 1;
                let len = quoted[1..].find(quote)?;
                Some(value_start..value_start + len)
            });
        value.unwrap_or(tag).into()
    }
}

pub(crate) fn parse_document(name: &str, text: &str) -> Result<MapData, MapParseError> {
    zone!("parse_document");
    let input = Input { name, text };

    // Older Tiled versions write a DOCTYPE header.
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let doc = Document::parse_with_options(text, options).map_err(|error| {
        let span = byte_offset(text, error.pos()).map(|offset| SourceSpan::from((offset, 0)));
        MapParseError::MalformedXml {
            error,
            src: input.named(),
            span,
        }
    })?;
    let root = doc.root_element();

    if !root
        .descendants()
        .skip(1)
        .any(|node| node.has_tag_name("tileset"))
    {
        return Err(MapParseError::MissingTileset {
            src: input.named(),
            span: input.start_tag(root).into(),
        });
    }

    let width = size_attribute(&input, root, "width")?;
    let height = size_attribute(&input, root, "height")?;
    let tile_width = size_attribute(&input, root, "tilewidth")?;
    let tile_height = size_attribute(&input, root, "tileheight")?;

    let mut layers = Vec::new();
    collect_layers(&input, root, &mut layers)?;

    let properties = match root.children().find(|node| node.has_tag_name("properties")) {
        Some(block) => parse_properties(&input, block)?,
        None => HashMap::new(),
    };

    Ok(MapData {
        width,
        height,
        tile_width,
        tile_height,
        layers,
        properties,
    })
}

/// Absent means 0. Present but not a `u32` fails the load.
fn size_attribute(
    input: &Input,
    node: Node,
    attribute: &'static str,
) -> Result<u32, MapParseError> {
    let Some(value) = node.attribute(attribute) else {
        return Ok(0);
    };

    value
        .trim()
        .parse()
        .map_err(|source| MapParseError::InvalidAttribute {
            attribute,
            value: value.to_owned(),
            source,
            src: input.named(),
            span: input.attribute_span(node, attribute),
        })
}

/// `layer` children in document order, descending into layer groups.
fn collect_layers(
    input: &Input,
    parent: Node,
    layers: &mut Vec<TileLayer>,
) -> Result<(), MapParseError> {
    for node in parent.children().filter(Node::is_element) {
        match node.tag_name().name() {
            "layer" => layers.push(parse_layer(input, node)?),
            "group" => collect_layers(input, node, layers)?,
            _ => {}
        }
    }

    Ok(())
}

fn parse_layer(input: &Input, node: Node) -> Result<TileLayer, MapParseError> {
    zone!("parse_layer");
    let name = node.attribute("name").unwrap_or_default().to_owned();

    let Some(data) = node.children().find(|child| child.has_tag_name("data")) else {
        return Err(MapParseError::MissingLayerData {
            layer: name,
            src: input.named(),
            span: input.start_tag(node).into(),
        });
    };

    if let Some(encoding) = data.attribute("encoding").filter(|e| *e != "csv") {
        return Err(MapParseError::UnsupportedEncoding {
            layer: name,
            encoding: encoding.to_owned(),
            src: input.named(),
            span: input.attribute_span(data, "encoding"),
        });
    }

    let Some(text) = data.text().filter(|text| !text.trim().is_empty()) else {
        return Err(MapParseError::MissingLayerData {
            layer: name,
            src: input.named(),
            span: input.start_tag(data).into(),
        });
    };

    let ids = parse_tile_data(text).map_err(|source| {
        let span = match (&source, data.first_child()) {
            // Token offsets only line up with the file when the text node is
            // the raw source, i.e. it holds no entity references.
            (TileDataError::InvalidId { span, .. }, Some(child))
                if input.text.get(child.range()) == Some(text) =>
            {
                let start = child.range().start;
                SourceSpan::from(start + span.start..start + span.end)
            }
            _ => input.start_tag(data).into(),
        };
        MapParseError::InvalidTileId {
            layer: name.clone(),
            source,
            src: input.named(),
            span,
        }
    })?;

    Ok(TileLayer { name, ids })
}

fn parse_properties(
    input: &Input,
    block: Node,
) -> Result<HashMap<String, String>, MapParseError> {
    let mut properties = HashMap::new();
    for property in block
        .children()
        .filter(|child| child.has_tag_name("property"))
    {
        match (property.attribute("name"), property.attribute("value")) {
            (Some(key), Some(value)) => {
                properties.insert(key.to_owned(), value.to_owned());
            }
            _ => {
                return Err(MapParseError::InvalidProperty {
                    src: input.named(),
                    span: input.start_tag(property).into(),
                })
            }
        }
    }

    Ok(properties)
}

/// Byte offset of a 1-based row/column position reported by the XML parser.
fn byte_offset(text: &str, pos: TextPos) -> Option<usize> {
    let row = usize::try_from(pos.row).ok()?.checked_sub(1)?;
    let col = usize::try_from(pos.col).ok()?.checked_sub(1)?;

    let line_start = match row {
        0 => 0,
        _ => text.match_indices('\n').nth(row - 1)?.0 + 1,
    };
    let line = &text[line_start..];
    let within = line.char_indices().nth(col).map_or(line.len(), |(i, _)| i);

    Some(line_start + within)
}
