// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::node::{Mapping, Node, Scalar, ScalarStyle};
use crate::error::{PostRenderError, Result};
use std::borrow::Cow;
use std::collections::HashMap;
use yaml_rust2::parser::{Event, EventReceiver, Parser};
use yaml_rust2::scanner::TScalarStyle;

/// Decode every document of a multi-document stream. Empty documents come
/// back as null scalars; aliases are expanded to copies of their anchor.
pub fn decode_documents(input: &str) -> Result<Vec<Node>> {
    let input = normalize_document_end_markers(input);
    let mut builder = Builder::default();
    Parser::new_from_str(&input)
        .load(&mut builder, true)
        .map_err(|e| PostRenderError::StreamDecode(e.to_string()))?;

    match builder.error {
        Some(error) => Err(PostRenderError::StreamDecode(error)),
        None => Ok(builder.documents),
    }
}

enum Frame {
    Sequence { items: Vec<Node>, anchor: usize },
    Mapping { mapping: Mapping, key: Option<Node>, anchor: usize },
}

#[derive(Default)]
struct Builder {
    documents: Vec<Node>,
    stack: Vec<Frame>,
    anchors: HashMap<usize, Node>,
    error: Option<String>,
}

impl Builder {
    fn push(&mut self, node: Node, anchor: usize) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }
        match self.stack.last_mut() {
            None => self.documents.push(node),
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping { mapping, key, .. }) => match key.take() {
                Some(key) => mapping.push(key, node),
                None => *key = Some(node),
            },
        }
    }
}

impl EventReceiver for Builder {
    fn on_event(&mut self, event: Event) {
        if self.error.is_some() {
            return;
        }
        match event {
            Event::Scalar(value, style, anchor, tag) => {
                let style = match style {
                    TScalarStyle::Plain => ScalarStyle::Plain,
                    TScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
                    TScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
                    _ => ScalarStyle::Literal,
                };
                let tag = tag.map(|tag| shorthand_tag(&tag.handle, &tag.suffix));
                self.push(Node::Scalar(Scalar::new(value, style, tag)), anchor);
            }
            Event::SequenceStart(anchor, ..) => self.stack.push(Frame::Sequence {
                items: Vec::new(),
                anchor,
            }),
            Event::MappingStart(anchor, ..) => self.stack.push(Frame::Mapping {
                mapping: Mapping::new(),
                key: None,
                anchor,
            }),
            Event::SequenceEnd | Event::MappingEnd => match self.stack.pop() {
                Some(Frame::Sequence { items, anchor }) => self.push(Node::Sequence(items), anchor),
                Some(Frame::Mapping { mapping, anchor, .. }) => self.push(Node::Mapping(mapping), anchor),
                None => self.error = Some("unbalanced collection end".to_string()),
            },
            Event::Alias(id) => match self.anchors.get(&id).cloned() {
                Some(node) => self.push(node, 0),
                None => self.error = Some(format!("unknown alias {}", id)),
            },
            _ => {}
        }
    }
}

/// `tag:yaml.org,2002:str` becomes `!!str`, local tags keep their `!`.
fn shorthand_tag(handle: &str, suffix: &str) -> String {
    match handle {
        "tag:yaml.org,2002:" | "!!" => format!("!!{}", suffix),
        h if h.starts_with('!') => format!("{}{}", h, suffix),
        h => format!("!<{}{}>", h, suffix),
    }
}

/// A `...` line closes a document. The parser rejects one that has no
/// document before it, so it is rewritten to `---`, which opens an empty
/// document instead. Markers followed by a directive are left alone since
/// `---` may not precede one.
fn normalize_document_end_markers(input: &str) -> Cow<'_, str> {
    if !input.lines().any(is_document_end) {
        return Cow::Borrowed(input);
    }

    let lines: Vec<&str> = input.lines().collect();
    let mut normalized = String::with_capacity(input.len());
    for (i, line) in lines.iter().enumerate() {
        let before_directive = lines[i + 1..]
            .iter()
            .map(|l| l.trim_end())
            .find(|l| !l.is_empty() && !l.starts_with('#'))
            .is_some_and(|l| l.starts_with('%'));
        if is_document_end(line) && !before_directive {
            normalized.push_str("---");
        } else {
            normalized.push_str(line);
        }
        normalized.push('\n');
    }
    Cow::Owned(normalized)
}

fn is_document_end(line: &str) -> bool {
    line.strip_prefix("...")
        .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
}
