//! JSON payload writer.

use std::io::Write;

use log::debug;

use super::{Error, Exporter, Payload};

/// Writes a [`Payload`] as JSON.
///
/// In embeddable mode every `</` is escaped as `<\/`, so the output can sit
/// inside an HTML `<script>` element without closing it early. The escaped
/// text is still valid JSON and decodes to the same values.
#[derive(Debug)]
pub struct JsonExporter<W: Write> {
    writer: W,
    pretty: bool,
    embeddable: bool,
}

impl<W: Write> JsonExporter<W> {
    /// Creates a pretty-printing exporter.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: true,
            embeddable: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_embeddable(mut self, embeddable: bool) -> Self {
        self.embeddable = embeddable;
        self
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for JsonExporter<W> {
    fn export_payload(&mut self, payload: &Payload) -> Result<(), Error> {
        let mut text = if self.pretty {
            serde_json::to_string_pretty(payload)?
        } else {
            serde_json::to_string(payload)?
        };
        if self.embeddable {
            text = text.replace("</", "<\\/");
        }
        debug!(bytes = text.len(), pretty = self.pretty; "Payload encoded");

        self.writer.write_all(text.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
