//! Decoding of downloaded dataset bodies.
//!
//! Payloads are opaque to the probe: they are decoded to prove the bytes are
//! usable and then only described by shape.

use serde_pickle::{DeOptions, Value};

use crate::opcodes::walk_to_stop;
use crate::types::FetchError;

/// A delimited text table with a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// A decoded dataset.
#[derive(Debug, Clone)]
pub enum Payload {
    Table(Table),
    Object(Value),
    /// A well-formed pickle whose objects have no generic value form.
    Opaque { bytes: usize },
}

impl Payload {
    /// One-line shape description, e.g. `217 rows x 6 columns`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Payload::Table(table) => format!(
                "{} rows x {} columns",
                table.row_count(),
                table.column_count()
            ),
            Payload::Object(value) => describe_value(value),
            Payload::Opaque { bytes } => format!("pickled object ({bytes} bytes)"),
        }
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Dict(map) => format!("dict with {} entries", map.len()),
        Value::List(items) => format!("list with {} items", items.len()),
        Value::Tuple(items) => format!("tuple with {} items", items.len()),
        Value::Set(items) | Value::FrozenSet(items) => format!("set with {} items", items.len()),
        Value::Bytes(bytes) => format!("{} bytes", bytes.len()),
        Value::String(text) => format!("string of {} chars", text.chars().count()),
        Value::None => "None".to_string(),
        _ => "scalar".to_string(),
    }
}

/// Parse a CSV body. Every row must have as many fields as the header.
pub fn decode_csv(body: &[u8]) -> Result<Table, FetchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(body);

    let headers = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, rows })
}

/// Decode a pickle stream into a generic value.
///
/// Class references the decoder cannot resolve (pandas, networkx, numpy)
/// are replaced with `None` rather than failing the whole load. Containers
/// rebuilt from such a class, like `defaultdict` or `OrderedDict`, cannot be
/// filled in; when the opcode stream still runs cleanly to `STOP`, the body
/// is accepted as [`Payload::Opaque`]. Anything else keeps the decoder's
/// error.
pub fn decode_pickle(body: &[u8]) -> Result<Payload, FetchError> {
    let options = DeOptions::new().replace_unresolved_globals();
    match serde_pickle::value_from_slice(body, options) {
        Ok(value) => Ok(Payload::Object(value)),
        Err(err) => match walk_to_stop(body) {
            Ok(opcodes) => {
                tracing::debug!(
                    error = %err,
                    opcodes,
                    bytes = body.len(),
                    "Pickle has no generic value form, accepted as opaque"
                );
                Ok(Payload::Opaque { bytes: body.len() })
            }
            Err(_) => Err(err.into()),
        },
    }
}
