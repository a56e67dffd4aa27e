// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Block-style writer with 2-space indentation. Sequences are indented under
//! their key (`key:\n  - item`), matching what go-yaml v3 produces for Helm
//! charts. Scalars are written in the style they were read in.

use super::node::{Mapping, Node, Scalar, ScalarStyle};
use crate::error::{PostRenderError, Result};
use std::fmt::Write as _;

const INDENT: usize = 2;

/// Write documents separated by `---` lines, with no leading separator.
pub fn encode_documents(documents: &[Mapping]) -> Result<String> {
    let mut out = String::new();
    for (i, document) in documents.iter().enumerate() {
        if i > 0 {
            out.push_str("---\n");
        }
        write_mapping(&mut out, document, 0, false)?;
    }
    Ok(out)
}

/// Write a single document of any shape.
pub fn encode_document(document: &Node) -> Result<String> {
    let mut out = String::new();
    match document {
        Node::Mapping(m) if !m.is_empty() => write_mapping(&mut out, m, 0, false)?,
        Node::Sequence(items) if !items.is_empty() => write_sequence(&mut out, items, 0, false)?,
        other => write_inline(&mut out, other, 0)?,
    }
    Ok(out)
}

/// `inline` means the first entry continues a `- ` already on the line.
fn write_mapping(out: &mut String, mapping: &Mapping, indent: usize, inline: bool) -> Result<()> {
    for (i, (key, value)) in mapping.iter().enumerate() {
        if i > 0 || !inline {
            pad(out, indent);
        }
        let key = key
            .as_scalar()
            .ok_or_else(|| PostRenderError::StreamEncode("complex mapping keys are not supported".to_string()))?;
        write_key(out, key);
        out.push(':');
        match value {
            Node::Mapping(m) if !m.is_empty() => {
                out.push('\n');
                write_mapping(out, m, indent + INDENT, false)?;
            }
            Node::Sequence(items) if !items.is_empty() => {
                out.push('\n');
                write_sequence(out, items, indent + INDENT, false)?;
            }
            other => {
                out.push(' ');
                write_inline(out, other, indent)?;
            }
        }
    }
    Ok(())
}

fn write_sequence(out: &mut String, items: &[Node], indent: usize, inline: bool) -> Result<()> {
    for (i, item) in items.iter().enumerate() {
        if i > 0 || !inline {
            pad(out, indent);
        }
        out.push_str("- ");
        match item {
            Node::Mapping(m) if !m.is_empty() => write_mapping(out, m, indent + INDENT, true)?,
            Node::Sequence(nested) if !nested.is_empty() => write_sequence(out, nested, indent + INDENT, true)?,
            other => write_inline(out, other, indent)?,
        }
    }
    Ok(())
}

/// A scalar or empty collection after `key: ` or `- `, up to and including
/// its final newline. Block scalar lines go at `indent + 2`.
fn write_inline(out: &mut String, node: &Node, indent: usize) -> Result<()> {
    match node {
        Node::Mapping(_) => out.push_str("{}\n"),
        Node::Sequence(_) => out.push_str("[]\n"),
        Node::Scalar(scalar) => {
            if let Some(tag) = scalar.tag() {
                out.push_str(tag);
                out.push(' ');
            }
            match scalar.style() {
                ScalarStyle::Plain if !scalar.value().contains('\n') => out.push_str(scalar.value()),
                ScalarStyle::SingleQuoted if !scalar.value().contains('\n') => {
                    write_single_quoted(out, scalar.value())
                }
                ScalarStyle::Literal if fits_literal(scalar.value()) => {
                    write_literal(out, scalar.value(), indent + INDENT);
                    return Ok(());
                }
                _ => write_double_quoted(out, scalar.value()),
            }
            out.push('\n');
        }
    }
    Ok(())
}

fn write_key(out: &mut String, key: &Scalar) {
    if let Some(tag) = key.tag() {
        out.push_str(tag);
        out.push(' ');
    }
    match key.style() {
        ScalarStyle::Plain if !key.value().contains('\n') => out.push_str(key.value()),
        ScalarStyle::SingleQuoted if !key.value().contains('\n') => write_single_quoted(out, key.value()),
        _ => write_double_quoted(out, key.value()),
    }
}

/// Literal blocks need no indentation indicator when the first line starts
/// with content, and cannot carry control characters.
fn fits_literal(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with([' ', '\t', '\n'])
        && !value.chars().any(|c| c.is_control() && c != '\n' && c != '\t')
}

fn write_literal(out: &mut String, value: &str, indent: usize) {
    let (header, body) = match value.strip_suffix('\n') {
        None => ("|-", value),
        Some(rest) if rest.ends_with('\n') => ("|+", rest),
        Some(rest) => ("|", rest),
    };
    out.push_str(header);
    out.push('\n');
    for line in body.split('\n') {
        if !line.is_empty() {
            pad(out, indent);
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn write_single_quoted(out: &mut String, value: &str) {
    out.push('\'');
    out.push_str(&value.replace('\'', "''"));
    out.push('\'');
}

fn write_double_quoted(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn pad(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::decode_documents;

    /// Decode and re-encode a single document
    fn round_trip(input: &str) -> String {
        let documents = decode_documents(input).unwrap();
        assert_eq!(documents.len(), 1);
        encode_document(&documents[0]).unwrap()
    }

    #[test]
    fn test_round_trip_is_byte_for_byte() {
        let input = "\
apiVersion: v1
kind: ConfigMap
data:
  tracing: \"on\"
  enabled: 'yes'
  mode: off
  octal: 0644
  big: 18446744073709551616
  version: 1.24
  quoted: \"15012\"
  escaped: \"a\\tb \\\"c\\\"\"
  single: 'it''s'
  empty: \"\"
  script: |
    #!/bin/sh

    echo done
  keep: |+
    trailing

  strip: |-
    no newline
";

        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_sequences_are_indented_under_their_key() {
        let input = "\
spec:
  volumes:
    - name: certs
      secret:
        defaultMode: 0644
        items:
          - key: a
    - name: empty
      emptyDir: {}
  args: []
  matrix:
    - - a
      - b
";

        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_sequence_at_parent_indent_is_reindented() {
        let output = round_trip("ports:\n- port: 80\n  name: http\n");

        assert_eq!(output, "ports:\n  - port: 80\n    name: http\n");
    }

    #[test]
    fn test_flow_collections_become_block() {
        let output = round_trip("args: [\"--a\", b]\nlabels: {app: x}\n");

        assert_eq!(output, "args:\n  - \"--a\"\n  - b\nlabels:\n  app: x\n");
    }

    #[test]
    fn test_multi_line_plain_scalar() {
        let output = round_trip("a: one\n  two\nb: one\n\n  two\n");

        assert_eq!(output, "a: one two\nb: \"one\\ntwo\"\n");
    }

    #[test]
    fn test_folded_block_is_written_as_literal() {
        let output = round_trip("text: >\n  one\n  two\n");

        assert_eq!(output, "text: |\n  one two\n");
    }

    #[test]
    fn test_new_strings_are_quoted_when_ambiguous() {
        let mut mapping = Mapping::new();
        mapping.insert("a", Node::string("on"));
        mapping.insert("b", Node::string("0644"));
        mapping.insert("c", Node::string("istio-system/default"));
        mapping.insert("d", Node::string("line\nbreak"));

        let output = encode_documents(&[mapping]).unwrap();

        assert_eq!(output, "a: \"on\"\nb: \"0644\"\nc: istio-system/default\nd: \"line\\nbreak\"\n");
    }

    #[test]
    fn test_documents_are_separated() {
        let mut first = Mapping::new();
        first.insert("kind", Node::string("A"));
        let mut second = Mapping::new();
        second.insert("kind", Node::string("B"));

        let output = encode_documents(&[first, second]).unwrap();

        assert_eq!(output, "kind: A\n---\nkind: B\n");
    }

    #[test]
    fn test_complex_key_is_encode_error() {
        let mapping: Mapping = [(Node::Sequence(vec![Node::string("a")]), Node::string("b"))]
            .into_iter()
            .collect();

        let err = encode_documents(&[mapping]).unwrap_err();

        assert!(matches!(err, PostRenderError::StreamEncode(_)));
    }
}
