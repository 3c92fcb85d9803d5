use std::collections::HashSet;

use tracing::warn;

use crate::model::{DesignPoint, SkippedElement};

/// Output of [`normalize_points`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedPoints {
    pub points: Vec<DesignPoint>,
    pub dropped: Vec<SkippedElement>,
}

impl NormalizedPoints {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Keep only points whose three coordinates are finite, preserving order.
///
/// With `dedupe`, a point equal in id and coordinates (bit for bit) to an
/// earlier one is dropped too. Running this on its own output is a no-op.
pub fn normalize_points(points: Vec<DesignPoint>, dedupe: bool) -> NormalizedPoints {
    let mut out = NormalizedPoints {
        points: Vec::with_capacity(points.len()),
        dropped: Vec::new(),
    };
    let mut seen: HashSet<(Option<String>, [u64; 3])> = HashSet::new();

    for (index, point) in points.into_iter().enumerate() {
        let location = format!("point #{}", index + 1);

        if !point.is_finite() {
            warn!(%location, id = point.label(), "dropping point with non-finite coordinate");
            out.dropped.push(SkippedElement {
                location,
                id: point.id().map(str::to_string),
                reason: format!(
                    "non-finite coordinate (E {}, N {}, Z {})",
                    point.easting(),
                    point.northing(),
                    point.elevation()
                ),
            });
            continue;
        }

        if dedupe {
            let key = (
                point.id().map(str::to_string),
                [
                    point.easting().to_bits(),
                    point.northing().to_bits(),
                    point.elevation().to_bits(),
                ],
            );
            if !seen.insert(key) {
                out.dropped.push(SkippedElement {
                    location,
                    id: point.id().map(str::to_string),
                    reason: "duplicate of an earlier point".into(),
                });
                continue;
            }
        }

        out.points.push(point);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceFormat;

    fn pt(id: &str, e: f64, n: f64, z: f64) -> DesignPoint {
        DesignPoint::new(Some(id.into()), e, n, z, SourceFormat::Landxml)
    }

    #[test]
    fn test_valid_points_unchanged() {
        let points = vec![pt("a", 1.0, 2.0, 3.0), pt("b", 4.0, 5.0, 6.0)];
        let normalized = normalize_points(points.clone(), false);
        assert_eq!(normalized.points, points);
        assert_eq!(normalized.dropped_count(), 0);
    }

    #[test]
    fn test_idempotent() {
        let points = vec![
            pt("a", 1.0, 2.0, 3.0),
            pt("nan", f64::NAN, 2.0, 3.0),
            pt("a", 1.0, 2.0, 3.0),
        ];
        let once = normalize_points(points, true);
        let twice = normalize_points(once.points.clone(), true);
        assert_eq!(twice.points, once.points);
        assert_eq!(twice.dropped_count(), 0);
    }

    #[test]
    fn test_non_finite_dropped_in_order() {
        let points = vec![
            pt("a", 1.0, 2.0, 3.0),
            pt("inf", f64::INFINITY, 2.0, 3.0),
            pt("c", 7.0, 8.0, f64::NEG_INFINITY),
            pt("d", 4.0, 5.0, 6.0),
        ];
        let normalized = normalize_points(points, false);
        let ids: Vec<_> = normalized.points.iter().map(|p| p.label()).collect();
        assert_eq!(ids, vec!["a", "d"]);
        assert_eq!(normalized.dropped_count(), 2);
        assert_eq!(normalized.dropped[0].location, "point #2");
    }

    #[test]
    fn test_duplicates_kept_without_dedupe() {
        let points = vec![pt("a", 1.0, 2.0, 3.0), pt("a", 1.0, 2.0, 3.0)];
        assert_eq!(normalize_points(points, false).points.len(), 2);
    }

    #[test]
    fn test_dedupe_requires_same_id() {
        let points = vec![
            pt("a", 1.0, 2.0, 3.0),
            pt("b", 1.0, 2.0, 3.0),
            pt("a", 1.0, 2.0, 3.0),
        ];
        let normalized = normalize_points(points, true);
        assert_eq!(normalized.points.len(), 2);
        assert_eq!(normalized.dropped[0].reason, "duplicate of an earlier point");
    }
}
