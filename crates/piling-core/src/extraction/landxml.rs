use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::error::PilingError;
use crate::model::{DesignPoint, ParsedPoints, SkippedElement, SourceFormat};
use crate::profile::schema::{AxisOrder, ExtractionProfile};

/// Parse LandXML point elements (`CgPoint` by default, any namespace prefix)
/// into design points, in document order.
///
/// Malformed XML fails the whole parse. Individual point elements whose
/// coordinate text is not exactly three numbers are skipped and reported.
pub fn parse_landxml(
    bytes: &[u8],
    profile: &ExtractionProfile,
) -> Result<ParsedPoints, PilingError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut parsed = ParsedPoints::default();
    let mut buf = Vec::new();
    let mut depth: usize = 0;
    let mut seen_root = false;
    let mut pending: Option<PendingPoint> = None;
    let mut element_count: usize = 0;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| malformed(&reader, e))?;

        match event {
            Event::Start(ref e) => {
                if depth == 0 && seen_root {
                    return Err(PilingError::ParseError(
                        "invalid XML: more than one root element".into(),
                    ));
                }
                seen_root = true;
                depth += 1;
                if pending.is_none() && profile.is_point_element(e.local_name().as_ref()) {
                    element_count += 1;
                    pending = Some(PendingPoint::open(e, element_count, depth)?);
                }
            }
            Event::Empty(ref e) => {
                if depth == 0 && seen_root {
                    return Err(PilingError::ParseError(
                        "invalid XML: more than one root element".into(),
                    ));
                }
                seen_root = true;
                if pending.is_none() && profile.is_point_element(e.local_name().as_ref()) {
                    element_count += 1;
                    let point = PendingPoint::open(e, element_count, depth + 1)?;
                    point.finish(profile.axis_order, &mut parsed);
                }
            }
            Event::Text(ref t) => {
                // Only direct text of the point element; child elements are not coordinates.
                if let Some(point) = pending.as_mut().filter(|p| p.depth == depth) {
                    let text = t.unescape().map_err(|e| malformed(&reader, e))?;
                    point.push_text(&text);
                }
            }
            Event::CData(ref c) => {
                if let Some(point) = pending.as_mut().filter(|p| p.depth == depth) {
                    point.push_text(&String::from_utf8_lossy(c));
                }
            }
            Event::End(_) => {
                if pending.as_ref().is_some_and(|p| p.depth == depth) {
                    if let Some(point) = pending.take() {
                        point.finish(profile.axis_order, &mut parsed);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    if !seen_root {
        return Err(PilingError::ParseError(
            "invalid XML: no root element".into(),
        ));
    }
    if depth > 0 {
        return Err(PilingError::ParseError(
            "invalid XML: unexpected end of document (unclosed element)".into(),
        ));
    }

    debug!(
        elements = element_count,
        points = parsed.points.len(),
        skipped = parsed.skipped.len(),
        "parsed LandXML point elements"
    );

    Ok(parsed)
}

fn malformed<R>(reader: &Reader<R>, err: impl std::fmt::Display) -> PilingError {
    PilingError::ParseError(format!(
        "invalid XML at byte {}: {}",
        reader.buffer_position(),
        err
    ))
}

/// A point element whose text is still being collected.
struct PendingPoint {
    index: usize,
    depth: usize,
    tag: String,
    name: Option<String>,
    text: String,
}

impl PendingPoint {
    fn open(e: &BytesStart<'_>, index: usize, depth: usize) -> Result<Self, PilingError> {
        let name = match e.try_get_attribute("name") {
            Ok(Some(attr)) => Some(
                attr.unescape_value()
                    .map_err(|err| {
                        PilingError::ParseError(format!("invalid XML attribute value: {err}"))
                    })?
                    .trim()
                    .to_string(),
            ),
            Ok(None) => None,
            Err(err) => {
                return Err(PilingError::ParseError(format!(
                    "invalid XML attributes: {err}"
                )));
            }
        };

        Ok(PendingPoint {
            index,
            depth,
            tag: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
            name: name.filter(|n| !n.is_empty()),
            text: String::new(),
        })
    }

    fn push_text(&mut self, text: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(text);
    }

    fn finish(self, axis_order: AxisOrder, out: &mut ParsedPoints) {
        match parse_coordinates(&self.text) {
            Ok(coords) => {
                let (easting, northing, elevation) = axis_order.to_enz(coords);
                out.points.push(DesignPoint::new(
                    self.name,
                    easting,
                    northing,
                    elevation,
                    SourceFormat::Landxml,
                ));
            }
            Err(reason) => {
                let location = format!("{} #{}", self.tag, self.index);
                warn!(%location, id = self.name.as_deref().unwrap_or(""), %reason, "skipping LandXML point");
                out.skipped.push(SkippedElement {
                    location,
                    id: self.name,
                    reason,
                });
            }
        }
    }
}

/// Parse whitespace-separated coordinate text; exactly three numbers.
fn parse_coordinates(text: &str) -> Result<[f64; 3], String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return Err("no coordinate text".into());
    }
    if tokens.len() != 3 {
        return Err(format!(
            "expected 3 coordinate values, found {}",
            tokens.len()
        ));
    }

    let mut coords = [0.0_f64; 3];
    for (slot, token) in coords.iter_mut().zip(&tokens) {
        *slot = token
            .parse::<f64>()
            .map_err(|_| format!("non-numeric coordinate '{}'", token))?;
    }
    Ok(coords)
}
