//! Decoding wire-format messages to JSON.

use std::io::{self, Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::read::DecoderReader;
use log::{debug, warn};
use prost_reflect::{Cardinality, DynamicMessage, ReflectMessage, SerializeOptions, Value};

use crate::registry::MessageResolver;
use crate::{Error, Result};

/// How the input stream is encoded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputEncoding {
    /// Raw protobuf wire format.
    #[default]
    Binary,
    /// Wire format wrapped in padded, standard-alphabet base64. Line breaks
    /// are ignored.
    Base64,
}

impl InputEncoding {
    /// Parses an encoding name. `"base64"` selects [`InputEncoding::Base64`];
    /// anything else, `"bin"` included, selects [`InputEncoding::Binary`].
    pub fn from_name(name: &str) -> InputEncoding {
        match name {
            "base64" => InputEncoding::Base64,
            "bin" => InputEncoding::Binary,
            other => {
                warn!("unknown input type {:?}, reading raw binary", other);
                InputEncoding::Binary
            }
        }
    }
}

/// Decodes a `name` message from `input` and writes it to `out` as indented JSON.
///
/// The type is resolved before `input` is touched, and nothing is written to
/// `out` unless the whole message decodes and serializes.
pub fn decode<R, I, W>(
    resolver: &R,
    name: &str,
    encoding: InputEncoding,
    input: I,
    mut out: W,
) -> Result<()>
where
    R: MessageResolver + ?Sized,
    I: Read,
    W: Write,
{
    let mut message = resolver.resolve(name)?;
    let bytes = read_input(input, encoding)?;
    debug!(
        "decoding {} bytes ({:?}) as {:?}",
        bytes.len(),
        encoding,
        message.descriptor().full_name()
    );

    prost::Message::merge(&mut message, bytes.as_slice()).map_err(Error::decode)?;
    if let Some(field) = missing_required_field(&message) {
        return Err(Error::missing_required(field));
    }

    let json = to_json(&message)?;
    out.write_all(&json).map_err(Error::write)?;
    out.flush().map_err(Error::write)
}

/// Renders `message` as JSON with two-space indentation and a trailing newline.
///
/// Keys are the field names declared in the schema. Fields holding their
/// default value are omitted.
pub fn to_json(message: &DynamicMessage) -> Result<Vec<u8>> {
    let options = SerializeOptions::new().use_proto_field_name(true);
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::pretty(&mut buf);
    message
        .serialize_with_options(&mut serializer, &options)
        .map_err(Error::serialize)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Full name of a `required` field left unset in `message` or in one of the
/// messages it contains.
fn missing_required_field(message: &DynamicMessage) -> Option<String> {
    let descriptor = message.descriptor();
    let unset = descriptor
        .fields()
        .find(|field| field.cardinality() == Cardinality::Required && !message.has_field(field));
    if let Some(field) = unset {
        return Some(field.full_name().to_owned());
    }
    message
        .fields()
        .find_map(|(_, value)| missing_required_in_value(value))
}

fn missing_required_in_value(value: &Value) -> Option<String> {
    match value {
        Value::Message(message) => missing_required_field(message),
        Value::List(values) => values.iter().find_map(missing_required_in_value),
        Value::Map(entries) => entries.values().find_map(missing_required_in_value),
        _ => None,
    }
}

fn read_input<I>(mut input: I, encoding: InputEncoding) -> Result<Vec<u8>>
where
    I: Read,
{
    let mut bytes = Vec::new();
    let read = match encoding {
        InputEncoding::Binary => input.read_to_end(&mut bytes),
        InputEncoding::Base64 => {
            DecoderReader::new(StripNewlines { inner: input }, &STANDARD).read_to_end(&mut bytes)
        }
    };
    read.map_err(Error::read)?;
    Ok(bytes)
}

/// Drops `\r` and `\n` from the wrapped stream.
struct StripNewlines<R> {
    inner: R,
}

impl<R> Read for StripNewlines<R>
where
    R: Read,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let n = self.inner.read(buf)?;
            if n == 0 {
                return Ok(0);
            }
            let mut kept = 0;
            for i in 0..n {
                if buf[i] != b'\r' && buf[i] != b'\n' {
                    buf[kept] = buf[i];
                    kept += 1;
                }
            }
            if kept > 0 {
                return Ok(kept);
            }
        }
    }
}
