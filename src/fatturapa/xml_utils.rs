use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::Cursor;

use crate::core::FatturaError;

pub type XmlResult = Result<String, FatturaError>;

fn xml_io(e: std::io::Error) -> FatturaError {
    FatturaError::Xml(format!("write error: {e}"))
}

pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    /// Writer with `indent` spaces per level when `pretty`, compact otherwise.
    pub fn new(pretty: bool, indent: usize) -> Self {
        let cursor = Cursor::new(Vec::new());
        let writer = if pretty {
            Writer::new_with_indent(cursor, b' ', indent)
        } else {
            Writer::new(cursor)
        };
        Self { writer }
    }

    pub fn declaration(&mut self) -> Result<&mut Self, FatturaError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn into_string(self) -> XmlResult {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| FatturaError::Xml(format!("UTF-8 error: {e}")))
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, FatturaError> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, FatturaError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, FatturaError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    /// `<name>text</name>`, with the five XML special characters escaped.
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, FatturaError> {
        self.text_element_with_attrs(name, text, &[])
    }

    pub fn text_element_with_attrs(
        &mut self,
        name: &str,
        text: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, FatturaError> {
        self.start_element_with_attrs(name, attrs)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    /// Text element only when the value is present.
    pub fn opt_text(&mut self, name: &str, text: Option<&str>) -> Result<&mut Self, FatturaError> {
        match text {
            Some(t) => self.text_element(name, t),
            None => Ok(self),
        }
    }

    /// Decimal rendered with exactly two decimals.
    pub fn amount(&mut self, name: &str, value: Decimal) -> Result<&mut Self, FatturaError> {
        self.text_element(name, &format_decimal(value))
    }

    pub fn opt_amount(
        &mut self,
        name: &str,
        value: Option<Decimal>,
    ) -> Result<&mut Self, FatturaError> {
        match value {
            Some(v) => self.amount(name, v),
            None => Ok(self),
        }
    }

    /// Schema flags are written as "SI" and omitted when false.
    pub fn flag(&mut self, name: &str, set: bool) -> Result<&mut Self, FatturaError> {
        if set {
            self.text_element(name, "SI")?;
        }
        Ok(self)
    }
}

/// Format a Decimal for XML output: exactly two decimal places, rounding
/// half away from zero.
pub fn format_decimal(d: Decimal) -> String {
    let mut rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    // rescale stops short of 2 when the mantissa has no room left
    let text = rounded.to_string();
    match rounded.scale() {
        0 => format!("{text}.00"),
        1 => format!("{text}0"),
        _ => text,
    }
}
