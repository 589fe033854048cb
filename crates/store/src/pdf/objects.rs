//! PDF Object Model
//!
//! The handful of object types a PDF file is built from, and their
//! serialization.

use super::encoding::encode_win_ansi;
use std::collections::BTreeMap;
use std::io::Write;

/// PDF object types
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    /// Literal string of WinAnsi bytes, written in parentheses
    String(Vec<u8>),
    /// Name object (written with a leading /)
    Name(String),
    Array(Vec<PdfObject>),
    Dictionary(PdfDictionary),
    Stream(PdfStream),
    /// Indirect reference to an object number
    Reference(u32),
}

/// PDF dictionary; keys are written in sorted order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfDictionary {
    entries: BTreeMap<String, PdfObject>,
}

impl PdfDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: PdfObject) {
        self.entries.insert(key.into(), value);
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.get(key)
    }

    /// Set the Type entry
    pub fn with_type(mut self, type_name: &str) -> Self {
        self.insert("Type", PdfObject::name(type_name));
        self
    }
}

/// PDF stream (dictionary + data)
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStream {
    pub dict: PdfDictionary,
    pub data: Vec<u8>,
    /// Data already carries a Filter and must not be compressed again
    pub compressed: bool,
}

impl PdfStream {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            dict: PdfDictionary::new(),
            data,
            compressed: false,
        }
    }
}

impl PdfObject {
    pub fn name(s: impl Into<String>) -> Self {
        PdfObject::Name(s.into())
    }

    pub fn text(s: &str) -> Self {
        PdfObject::String(encode_win_ansi(s))
    }

    /// `[0 0 width height]`
    pub fn rect(width: f64, height: f64) -> Self {
        PdfObject::Array(vec![
            PdfObject::Integer(0),
            PdfObject::Integer(0),
            PdfObject::Real(width),
            PdfObject::Real(height),
        ])
    }

    /// Append the serialized object to `out`
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            PdfObject::Integer(n) => push_fmt(out, format_args!("{n}")),
            PdfObject::Real(n) => out.extend_from_slice(format_real(*n).as_bytes()),
            PdfObject::String(data) => write_literal(out, data),
            PdfObject::Name(name) => write_name(out, name),
            PdfObject::Array(items) => {
                out.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(b' ');
                    }
                    item.write_to(out);
                }
                out.push(b']');
            }
            PdfObject::Dictionary(dict) => write_dictionary(out, dict),
            PdfObject::Stream(stream) => {
                write_dictionary(out, &stream.dict);
                out.extend_from_slice(b"\nstream\n");
                out.extend_from_slice(&stream.data);
                out.extend_from_slice(b"\nendstream");
            }
            PdfObject::Reference(num) => push_fmt(out, format_args!("{num} 0 R")),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_to(&mut out);
        out
    }
}

fn push_fmt(out: &mut Vec<u8>, args: std::fmt::Arguments<'_>) {
    // Writing into a Vec cannot fail
    let _ = out.write_fmt(args);
}

/// Real numbers with at most four decimals and no trailing zeros
pub fn format_real(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.fract() == 0.0 {
        return format!("{n:.0}");
    }
    let s = format!("{n:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn write_literal(out: &mut Vec<u8>, data: &[u8]) {
    out.push(b'(');
    for &byte in data {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(byte);
            }
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            0x20..=0x7E => out.push(byte),
            _ => push_fmt(out, format_args!("\\{byte:03o}")),
        }
    }
    out.push(b')');
}

fn write_name(out: &mut Vec<u8>, name: &str) {
    out.push(b'/');
    for byte in name.bytes() {
        match byte {
            b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' => {
                push_fmt(out, format_args!("#{byte:02X}"))
            }
            0x21..=0x7E => out.push(byte),
            _ => push_fmt(out, format_args!("#{byte:02X}")),
        }
    }
}

fn write_dictionary(out: &mut Vec<u8>, dict: &PdfDictionary) {
    out.extend_from_slice(b"<<");
    for (key, value) in &dict.entries {
        out.push(b' ');
        write_name(out, key);
        out.push(b' ');
        value.write_to(out);
    }
    out.extend_from_slice(b" >>");
}
