//! Hole reconstruction from raw CAD primitives.
//!
//! Plate drawings describe each tube hole either as a full CIRCLE entity
//! or as two complementary ARC entities sharing center and radius. The
//! extractor merges arc pairs, accepts lone circles, and filters out
//! boundary/reference circles whose radius does not match the expected
//! hole radius.
//!
//! Extraction is a pure function of its input plus the configured
//! tolerances. Per-primitive problems (incomplete coverage, radius
//! mismatch, losing candidates of an ambiguous match) are returned as
//! diagnostics next to the best-effort collection; `extract_strict` turns
//! ambiguity into a hard error instead.

use serde::{Deserialize, Serialize};

use platescan_core::{
    CadPrimitive, ExtractionTolerances, GeometryError, Hole, HoleCollection,
};

/// Why a primitive was left out of the reconstructed collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The reconstructed radius is outside the tolerance band around the
    /// expected hole radius (boundary or reference geometry).
    RadiusMismatch {
        /// Expected hole radius.
        expected: f64,
        /// Radius actually reconstructed.
        actual: f64,
    },
    /// Arc coverage fell short of a full circle.
    IncompleteCoverage {
        /// Degrees actually covered.
        covered_degrees: f64,
    },
    /// The primitive lost an ambiguous match at a contested center.
    AmbiguousMatch {
        /// Contested center x.
        center_x: f64,
        /// Contested center y.
        center_y: f64,
    },
}

/// One primitive that did not make it into the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedPrimitive {
    /// The skipped primitive.
    pub primitive: CadPrimitive,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Result of an extraction pass: the best-effort collection plus
/// diagnostics for every primitive that was skipped.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Reconstructed holes, with provisional `H{n:04}` ids.
    pub collection: HoleCollection,
    /// Primitives that were not used.
    pub skipped: Vec<SkippedPrimitive>,
}

/// Reconstructs holes from CAD primitives.
#[derive(Debug, Clone)]
pub struct GeometryExtractor {
    tolerances: ExtractionTolerances,
    expected_radius: f64,
}

/// A cluster of arcs sharing (within tolerance) one center and radius.
struct ArcCluster {
    center_x: f64,
    center_y: f64,
    radius: f64,
    members: Vec<CadPrimitive>,
}

impl ArcCluster {
    fn matches(&self, primitive: &CadPrimitive, tol: &ExtractionTolerances) -> bool {
        let (x, y) = primitive.center();
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        (dx * dx + dy * dy).sqrt() <= tol.position
            && (primitive.radius() - self.radius).abs() <= tol.radius
    }
}

impl GeometryExtractor {
    /// Create an extractor with the given tolerances and expected hole
    /// radius. An expected radius of zero disables the radius filter.
    pub fn new(tolerances: ExtractionTolerances, expected_radius: f64) -> Self {
        Self {
            tolerances,
            expected_radius,
        }
    }

    /// Reconstruct holes from primitives, best-effort.
    ///
    /// Ambiguous matches are resolved in favor of the arc pair with the
    /// smallest combined angular gap; the losing candidates are reported
    /// in the diagnostics. Returns `GeometryError::EmptyResult` when a
    /// non-empty input yields no holes at all.
    pub fn extract(&self, primitives: &[CadPrimitive]) -> Result<ExtractionReport, GeometryError> {
        self.run(primitives, false)
    }

    /// Like [`GeometryExtractor::extract`], but fails with
    /// `GeometryError::AmbiguousMatch` as soon as more than two primitives
    /// compete for one center/radius combination.
    pub fn extract_strict(
        &self,
        primitives: &[CadPrimitive],
    ) -> Result<ExtractionReport, GeometryError> {
        self.run(primitives, true)
    }

    fn run(
        &self,
        primitives: &[CadPrimitive],
        strict: bool,
    ) -> Result<ExtractionReport, GeometryError> {
        self.validate_tolerances()?;

        let mut report = ExtractionReport::default();
        if primitives.is_empty() {
            return Ok(report);
        }

        // Candidate circles before the radius filter: (x, y, r).
        let mut candidates: Vec<(f64, f64, f64)> = Vec::new();

        let mut clusters: Vec<ArcCluster> = Vec::new();
        for primitive in primitives {
            match primitive {
                CadPrimitive::Circle {
                    center_x,
                    center_y,
                    radius,
                } => candidates.push((*center_x, *center_y, *radius)),
                arc @ CadPrimitive::Arc { .. } => {
                    match clusters
                        .iter_mut()
                        .find(|c| c.matches(arc, &self.tolerances))
                    {
                        Some(cluster) => cluster.members.push(arc.clone()),
                        None => {
                            let (x, y) = arc.center();
                            clusters.push(ArcCluster {
                                center_x: x,
                                center_y: y,
                                radius: arc.radius(),
                                members: vec![arc.clone()],
                            });
                        }
                    }
                }
            }
        }

        for cluster in clusters {
            self.resolve_cluster(cluster, strict, &mut candidates, &mut report.skipped)?;
        }

        let mut next_index = 1usize;
        for (x, y, r) in candidates {
            if self.expected_radius > 0.0 && (r - self.expected_radius).abs() > self.tolerances.radius
            {
                tracing::debug!(
                    radius = r,
                    expected = self.expected_radius,
                    "rejecting circle outside expected radius band"
                );
                report.skipped.push(SkippedPrimitive {
                    primitive: CadPrimitive::Circle {
                        center_x: x,
                        center_y: y,
                        radius: r,
                    },
                    reason: SkipReason::RadiusMismatch {
                        expected: self.expected_radius,
                        actual: r,
                    },
                });
                continue;
            }
            let id = format!("H{next_index:04}");
            next_index += 1;
            report.collection.insert(Hole::new(id, x, y, r));
        }

        if report.collection.is_empty() {
            return Err(GeometryError::EmptyResult {
                primitives: primitives.len(),
            });
        }

        tracing::debug!(
            holes = report.collection.len(),
            skipped = report.skipped.len(),
            "extraction complete"
        );
        Ok(report)
    }

    /// Turn one arc cluster into at most one candidate circle.
    fn resolve_cluster(
        &self,
        cluster: ArcCluster,
        strict: bool,
        candidates: &mut Vec<(f64, f64, f64)>,
        skipped: &mut Vec<SkippedPrimitive>,
    ) -> Result<(), GeometryError> {
        let full_coverage = 360.0 - self.tolerances.gap_degrees;

        match cluster.members.len() {
            1 => {
                let arc = &cluster.members[0];
                let span = arc.span_degrees();
                if span >= full_coverage {
                    let (x, y) = arc.center();
                    candidates.push((x, y, arc.radius()));
                } else {
                    skipped.push(SkippedPrimitive {
                        primitive: arc.clone(),
                        reason: SkipReason::IncompleteCoverage {
                            covered_degrees: span,
                        },
                    });
                }
            }
            2 => {
                let union = coverage_union(&cluster.members[0], &cluster.members[1]);
                if union >= full_coverage {
                    candidates.push(merge_pair(&cluster.members[0], &cluster.members[1]));
                } else {
                    for arc in cluster.members {
                        skipped.push(SkippedPrimitive {
                            primitive: arc,
                            reason: SkipReason::IncompleteCoverage {
                                covered_degrees: union,
                            },
                        });
                    }
                }
            }
            n => {
                if strict {
                    return Err(GeometryError::AmbiguousMatch {
                        center_x: cluster.center_x,
                        center_y: cluster.center_y,
                        radius: cluster.radius,
                        candidates: n,
                    });
                }
                self.resolve_ambiguous(cluster, candidates, skipped);
            }
        }
        Ok(())
    }

    /// Pick the arc pair with the smallest combined angular gap; report
    /// every other member as an ambiguous-match loser.
    fn resolve_ambiguous(
        &self,
        cluster: ArcCluster,
        candidates: &mut Vec<(f64, f64, f64)>,
        skipped: &mut Vec<SkippedPrimitive>,
    ) {
        tracing::warn!(
            center_x = cluster.center_x,
            center_y = cluster.center_y,
            members = cluster.members.len(),
            "ambiguous arc match; keeping best pair"
        );

        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..cluster.members.len() {
            for j in (i + 1)..cluster.members.len() {
                let union = coverage_union(&cluster.members[i], &cluster.members[j]);
                let gap = 360.0 - union;
                if best.map_or(true, |(_, _, g)| gap < g) {
                    best = Some((i, j, gap));
                }
            }
        }

        let full_coverage = 360.0 - self.tolerances.gap_degrees;
        let (keep_i, keep_j, gap) = match best {
            Some(b) => b,
            None => return,
        };

        for (idx, arc) in cluster.members.iter().enumerate() {
            if idx == keep_i || idx == keep_j {
                continue;
            }
            skipped.push(SkippedPrimitive {
                primitive: arc.clone(),
                reason: SkipReason::AmbiguousMatch {
                    center_x: cluster.center_x,
                    center_y: cluster.center_y,
                },
            });
        }

        if 360.0 - gap >= full_coverage {
            candidates.push(merge_pair(
                &cluster.members[keep_i],
                &cluster.members[keep_j],
            ));
        } else {
            for idx in [keep_i, keep_j] {
                skipped.push(SkippedPrimitive {
                    primitive: cluster.members[idx].clone(),
                    reason: SkipReason::IncompleteCoverage {
                        covered_degrees: 360.0 - gap,
                    },
                });
            }
        }
    }

    fn validate_tolerances(&self) -> Result<(), GeometryError> {
        for (name, value) in [
            ("position", self.tolerances.position),
            ("radius", self.tolerances.radius),
            ("gap_degrees", self.tolerances.gap_degrees),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GeometryError::InvalidTolerance { name, value });
            }
        }
        Ok(())
    }
}

/// Merged circle from two complementary arcs: mean center, mean radius.
fn merge_pair(a: &CadPrimitive, b: &CadPrimitive) -> (f64, f64, f64) {
    let (ax, ay) = a.center();
    let (bx, by) = b.center();
    ((ax + bx) / 2.0, (ay + by) / 2.0, (a.radius() + b.radius()) / 2.0)
}

/// Combined angular coverage of two arcs: the union of their swept
/// intervals mod 360. Overlapping or duplicated arcs do not count the
/// shared sweep twice, so partial coverage never reads as full.
fn coverage_union(a: &CadPrimitive, b: &CadPrimitive) -> f64 {
    let span_a = a.span_degrees();
    let span_b = b.span_degrees();
    if span_a >= 360.0 || span_b >= 360.0 {
        return 360.0;
    }
    let start_a = start_angle_of(a);
    let start_b = start_angle_of(b);
    // Intervals live on a circle; compare b at the wrap offsets that can
    // touch a's linearized [start_a, start_a + span_a) window.
    let mut overlap = 0.0;
    for shift in [-360.0, 0.0, 360.0] {
        let lo = (start_b + shift).max(start_a);
        let hi = (start_b + shift + span_b).min(start_a + span_a);
        if hi > lo {
            overlap += hi - lo;
        }
    }
    (span_a + span_b - overlap).min(360.0)
}

fn start_angle_of(p: &CadPrimitive) -> f64 {
    match p {
        CadPrimitive::Circle { .. } => 0.0,
        CadPrimitive::Arc { start_angle, .. } => start_angle.rem_euclid(360.0),
    }
}
