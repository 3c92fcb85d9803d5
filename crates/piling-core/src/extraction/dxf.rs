use tracing::{debug, warn};

use crate::error::PilingError;
use crate::model::{DesignPoint, ParsedPoints, SkippedElement, SourceFormat};

const BINARY_SENTINEL: &[u8] = b"AutoCAD Binary DXF";

/// One group code / value pair from an ASCII DXF file.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPair<'a> {
    pub code: i32,
    pub value: &'a str,
    /// 1-based line number of the group code.
    pub line: usize,
}

/// Split ASCII DXF text into group code / value pairs.
///
/// Reading stops at the `0 EOF` pair; anything after it, and blank lines
/// at the end of the file, are ignored. Fails when the pair framing is
/// broken: a code line that is not an integer, or a trailing code with no
/// value line.
pub fn read_pairs(text: &str) -> Result<Vec<GroupPair<'_>>, PilingError> {
    let mut pairs = Vec::new();
    let mut lines = text.lines().enumerate();

    while let Some((idx, code_line)) = lines.next() {
        let code_str = code_line.trim();
        if code_str.is_empty() {
            if pairs.is_empty() {
                continue;
            }
            if lines.clone().all(|(_, rest)| rest.trim().is_empty()) {
                break;
            }
        }
        let code: i32 = code_str.parse().map_err(|_| {
            PilingError::ParseError(format!(
                "invalid DXF: expected group code on line {}, found '{}'",
                idx + 1,
                truncate(code_str, 40)
            ))
        })?;
        let (_, value) = lines.next().ok_or_else(|| {
            PilingError::ParseError(format!(
                "invalid DXF: group code {} on line {} has no value",
                code,
                idx + 1
            ))
        })?;
        let value = value.trim();
        pairs.push(GroupPair {
            code,
            value,
            line: idx + 1,
        });
        if code == 0 && value == "EOF" {
            break;
        }
    }

    Ok(pairs)
}

/// Extract POINT locations and INSERT insertion points from the ENTITIES
/// section of an ASCII DXF file, in file order.
///
/// Axis convention: group 10 (X) is Easting, 20 (Y) is Northing and
/// 30 (Z) is Elevation. Group 30 may be absent and defaults to 0.
/// Paper-space entities (group 67 = 1) are ignored.
pub fn parse_dxf(bytes: &[u8]) -> Result<ParsedPoints, PilingError> {
    if bytes.starts_with(BINARY_SENTINEL) {
        return Err(PilingError::ParseError(
            "binary DXF is not supported; save the drawing as ASCII DXF".into(),
        ));
    }

    let text = String::from_utf8_lossy(bytes);
    let pairs = read_pairs(&text)?;

    if !pairs.iter().any(|p| p.code == 0 && p.value == "SECTION") {
        return Err(PilingError::ParseError(
            "invalid DXF: no SECTION found".into(),
        ));
    }

    let mut parsed = ParsedPoints::default();
    let Some(entities) = entities_section(&pairs) else {
        debug!("DXF has no ENTITIES section");
        return Ok(parsed);
    };

    let mut scanned = 0usize;
    for entity in split_entities(entities) {
        let kind = match entity[0].value {
            "POINT" => EntityKind::Point,
            "INSERT" => EntityKind::Insert,
            _ => continue,
        };
        if is_paper_space(entity) {
            continue;
        }
        scanned += 1;

        match read_entity(kind, entity) {
            Ok(point) => parsed.points.push(point),
            Err(reason) => {
                let location = format!("{} at line {}", entity[0].value, entity[0].line);
                let id = entity_id(kind, entity);
                warn!(%location, %reason, "skipping DXF entity");
                parsed.skipped.push(SkippedElement {
                    location,
                    id,
                    reason,
                });
            }
        }
    }

    debug!(
        entities = scanned,
        points = parsed.points.len(),
        skipped = parsed.skipped.len(),
        "parsed DXF entities"
    );

    Ok(parsed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntityKind {
    Point,
    Insert,
}

/// Pairs between `0 SECTION / 2 ENTITIES` and the following `0 ENDSEC`.
fn entities_section<'p, 'a>(pairs: &'p [GroupPair<'a>]) -> Option<&'p [GroupPair<'a>]> {
    let start = pairs.windows(2).position(|w| {
        w[0].code == 0 && w[0].value == "SECTION" && w[1].code == 2 && w[1].value == "ENTITIES"
    })? + 2;
    let rest = &pairs[start..];
    let end = rest
        .iter()
        .position(|p| p.code == 0 && p.value == "ENDSEC")
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Split a section into entities; each starts at a group 0 pair.
fn split_entities<'p, 'a>(section: &'p [GroupPair<'a>]) -> Vec<&'p [GroupPair<'a>]> {
    let mut entities = Vec::new();
    let mut start = None;

    for (i, pair) in section.iter().enumerate() {
        if pair.code == 0 {
            if let Some(s) = start {
                entities.push(&section[s..i]);
            }
            start = Some(i);
        }
    }

    if let Some(s) = start {
        entities.push(&section[s..]);
    }

    entities
}

fn find_value<'a>(entity: &[GroupPair<'a>], code: i32) -> Option<&'a str> {
    entity.iter().find(|p| p.code == code).map(|p| p.value)
}

fn is_paper_space(entity: &[GroupPair<'_>]) -> bool {
    find_value(entity, 67).is_some_and(|v| v.trim() == "1")
}

fn entity_id(kind: EntityKind, entity: &[GroupPair<'_>]) -> Option<String> {
    let handle = find_value(entity, 5).filter(|h| !h.is_empty());
    match kind {
        EntityKind::Point => handle.map(|h| format!("POINT_{h}")),
        EntityKind::Insert => {
            let block = find_value(entity, 2).unwrap_or("");
            Some(match handle {
                Some(h) => format!("BLK_{block}_{h}"),
                None => format!("BLK_{block}"),
            })
        }
    }
}

fn read_entity(kind: EntityKind, entity: &[GroupPair<'_>]) -> Result<DesignPoint, String> {
    let easting = required_coord(entity, 10)?;
    let northing = required_coord(entity, 20)?;
    let elevation = match find_value(entity, 30) {
        Some(v) => parse_coord(30, v)?,
        None => 0.0,
    };

    Ok(DesignPoint::new(
        entity_id(kind, entity),
        easting,
        northing,
        elevation,
        SourceFormat::Dxf,
    ))
}

fn required_coord(entity: &[GroupPair<'_>], code: i32) -> Result<f64, String> {
    let value =
        find_value(entity, code).ok_or_else(|| format!("missing group code {code}"))?;
    parse_coord(code, value)
}

fn parse_coord(code: i32, value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("non-numeric value '{}' for group code {}", value, code))
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
