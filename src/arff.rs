//! ARFF reading and writing for batch datasets.
//!
//! Supports `@relation`, numeric (`numeric`/`real`/`integer`) and nominal
//! (`{a, b, c}`) attribute declarations, `%` comment lines and plain CSV
//! data rows with optional single or double quoting. Sparse rows and missing
//! values are not supported. The loader validates every nominal field
//! against the declared labels, so a successfully loaded dataset satisfies
//! the schema invariant relied on by the algorithms.

use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use std::fs::File;
use std::io::{BufRead, BufReader, Error, ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;

/// Loads a dataset from an ARFF file. The class attribute defaults to the
/// last declared one.
pub fn load<P: AsRef<Path>>(path: P, class_index: Option<usize>) -> Result<Dataset, Error> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut relation_name = String::from("unnamed");
    let mut attributes: Vec<AttributeRef> = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut in_data = false;

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        if in_data {
            rows.push(parse_row(trimmed, &attributes)?);
            continue;
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("@relation") {
            relation_name =
                strip_surrounding_quotes(trimmed["@relation".len()..].trim()).to_string();
        } else if lower.starts_with("@attribute") {
            attributes.push(parse_attribute(trimmed["@attribute".len()..].trim())?);
        } else if lower.starts_with("@data") {
            if attributes.is_empty() {
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    "@data reached before any @attribute declaration",
                ));
            }
            in_data = true;
        } else {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("unrecognized header line: '{trimmed}'"),
            ));
        }
    }

    if attributes.is_empty() {
        return Err(Error::new(
            ErrorKind::InvalidData,
            "no attribute declarations found",
        ));
    }
    let class_index = class_index.unwrap_or(attributes.len() - 1);
    if class_index >= attributes.len() {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!(
                "class index {class_index} out of range for {} attributes",
                attributes.len()
            ),
        ));
    }

    let header = Arc::new(InstanceHeader::new(relation_name, attributes, class_index));
    let instances = rows
        .into_iter()
        .map(|values| Arc::new(DenseInstance::new(Arc::clone(&header), values)) as Arc<dyn Instance>)
        .collect();
    Ok(Dataset::new(header, instances))
}

/// Writes a dataset back out as ARFF, one CSV row per instance.
pub fn save<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<(), Error> {
    let mut writer = File::create(path)?;
    writeln!(writer, "@relation {}", dataset.header().relation_name())?;
    writeln!(writer)?;
    for attribute in &dataset.header().attributes {
        writeln!(writer, "{}", attribute.arff_representation())?;
    }
    writeln!(writer)?;
    writeln!(writer, "@data")?;
    for instance in dataset.instances() {
        let fields: Vec<String> = (0..instance.number_of_attributes())
            .map(|index| match instance.label_at_index(index) {
                Some(label) => label.to_string(),
                None => instance
                    .value_at_index(index)
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
            })
            .collect();
        writeln!(writer, "{}", fields.join(","))?;
    }
    Ok(())
}

fn parse_attribute(declaration: &str) -> Result<AttributeRef, Error> {
    let (name, rest) = split_attribute_name(declaration)?;
    let rest = rest.trim();
    if let Some(body) = rest.strip_prefix('{') {
        let Some(body) = body.strip_suffix('}') else {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("unterminated label set for attribute '{name}'"),
            ));
        };
        let values: Vec<String> = body
            .split(',')
            .map(|label| strip_surrounding_quotes(label.trim()).to_string())
            .filter(|label| !label.is_empty())
            .collect();
        if values.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("attribute '{name}' declares no labels"),
            ));
        }
        Ok(Arc::new(NominalAttribute::with_values(name, values)) as AttributeRef)
    } else {
        match rest.to_lowercase().as_str() {
            "numeric" | "real" | "integer" => {
                Ok(Arc::new(NumericAttribute::new(name)) as AttributeRef)
            }
            other => Err(Error::new(
                ErrorKind::InvalidData,
                format!("unsupported attribute type '{other}'"),
            )),
        }
    }
}

fn split_attribute_name(declaration: &str) -> Result<(String, &str), Error> {
    let declaration = declaration.trim_start();
    if let Some(quote) = declaration.chars().next().filter(|c| *c == '\'' || *c == '"') {
        let inner = &declaration[1..];
        let Some(end) = inner.find(quote) else {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("unterminated quote in attribute declaration '{declaration}'"),
            ));
        };
        Ok((inner[..end].to_string(), &inner[end + 1..]))
    } else {
        let end = declaration
            .find(char::is_whitespace)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidData,
                    format!("attribute declaration '{declaration}' has no type"),
                )
            })?;
        Ok((declaration[..end].to_string(), &declaration[end..]))
    }
}

fn parse_row(line: &str, attributes: &[AttributeRef]) -> Result<Vec<f64>, Error> {
    let fields = split_preserving_quotes(line);
    if fields.len() != attributes.len() {
        return Err(Error::new(
            ErrorKind::InvalidData,
            format!(
                "row has {} fields, schema declares {} attributes: '{line}'",
                fields.len(),
                attributes.len()
            ),
        ));
    }

    let mut values = Vec::with_capacity(fields.len());
    for (field, attribute) in fields.iter().zip(attributes) {
        let field = strip_surrounding_quotes(field.trim());
        if let Some(nominal) = attribute.as_any().downcast_ref::<NominalAttribute>() {
            let Some(index) = nominal.index_of_value(field) else {
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!(
                        "label '{field}' is not declared for attribute '{}'",
                        nominal.name
                    ),
                ));
            };
            values.push(index as f64);
        } else {
            let value: f64 = field.parse().map_err(|_| {
                Error::new(
                    ErrorKind::InvalidData,
                    format!(
                        "'{field}' is not a number for attribute '{}'",
                        attribute.name()
                    ),
                )
            })?;
            values.push(value);
        }
    }
    Ok(values)
}

#[inline]
fn strip_surrounding_quotes(s: &str) -> &str {
    let b = s.as_bytes();
    if b.len() >= 2 {
        let first = b[0];
        let last = b[b.len() - 1];
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

fn split_preserving_quotes(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes: Option<char> = None;

    for ch in line.chars() {
        match in_quotes {
            Some(q) => {
                if ch == q {
                    in_quotes = None;
                }
                cur.push(ch);
            }
            None => {
                if ch == '"' || ch == '\'' {
                    in_quotes = Some(ch);
                    cur.push(ch);
                } else if ch == ',' {
                    out.push(cur.trim().to_string());
                    cur.clear();
                } else {
                    cur.push(ch);
                }
            }
        }
    }
    if !cur.is_empty() {
        out.push(cur.trim().to_string());
    }
    out
}
