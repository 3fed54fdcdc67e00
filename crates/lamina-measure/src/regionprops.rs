//! Region property tables
//!
//! Computes per-region measurements over a label stack, optionally weighted
//! by a paired intensity stack, and collects them into a [`ResultsTable`]
//! with one row per region. Vector-valued properties expand into suffixed
//! columns (`centroid-0`, `bbox-3`, `moments_hu-6`), matching how the host
//! UI's table widget displays them.
//!
//! Coordinate convention: axis 0 is the first (slowest-varying) axis of the
//! stack; 2-D moments treat axis 0 as rows and axis 1 as columns.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::error::{MeasureError, MeasureResult};
use crate::props::{is_2d_only, is_known_property, needs_intensity};
use lamina_core::{ImageStack, LabelStack};

/// One named column of measurement values
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name (property name, suffixed for vector-valued properties)
    pub name: String,
    /// One value per region, ordered by ascending label
    pub values: Vec<f64>,
}

/// Tabulated region measurements, one row per region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsTable {
    columns: Vec<Column>,
}

impl ResultsTable {
    /// All columns in display order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in display order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Values of one column
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Number of rows (regions)
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }
}

/// One labeled region gathered from the stack
struct Region {
    label: u32,
    coords: Vec<Vec<usize>>,
    intensities: Vec<f64>,
}

impl Region {
    fn count(&self) -> usize {
        self.coords.len()
    }

    /// Per-axis minimum and exclusive maximum of the region's coordinates
    fn bbox(&self, ndim: usize) -> (Vec<usize>, Vec<usize>) {
        let mut min = vec![usize::MAX; ndim];
        let mut max = vec![0usize; ndim];
        for coord in &self.coords {
            for axis in 0..ndim {
                min[axis] = min[axis].min(coord[axis]);
                max[axis] = max[axis].max(coord[axis] + 1);
            }
        }
        (min, max)
    }

    fn centroid(&self, ndim: usize) -> Vec<f64> {
        let n = self.count() as f64;
        let mut sums = vec![0.0; ndim];
        for coord in &self.coords {
            for axis in 0..ndim {
                sums[axis] += coord[axis] as f64;
            }
        }
        sums.iter().map(|s| s / n).collect()
    }

    fn centroid_weighted(&self, ndim: usize) -> Vec<f64> {
        let total: f64 = self.intensities.iter().sum();
        let mut sums = vec![0.0; ndim];
        for (coord, &w) in self.coords.iter().zip(&self.intensities) {
            for axis in 0..ndim {
                sums[axis] += coord[axis] as f64 * w;
            }
        }
        sums.iter().map(|s| s / total).collect()
    }

    /// Normalized second-order central moments (a, b, c) of a 2-D region:
    /// row variance, row/column covariance, column variance.
    fn covariance(&self) -> (f64, f64, f64) {
        let n = self.count() as f64;
        let centroid = self.centroid(2);
        let (mut a, mut b, mut c) = (0.0, 0.0, 0.0);
        for coord in &self.coords {
            let dr = coord[0] as f64 - centroid[0];
            let dc = coord[1] as f64 - centroid[1];
            a += dr * dr;
            b += dr * dc;
            c += dc * dc;
        }
        (a / n, b / n, c / n)
    }

    /// Hu's seven moment invariants of a 2-D region
    ///
    /// With `weighted` set, each pixel contributes its intensity instead of
    /// a unit weight.
    fn hu_moments(&self, weighted: bool) -> [f64; 7] {
        let weight = |i: usize| {
            if weighted {
                self.intensities[i]
            } else {
                1.0
            }
        };

        let mut m00 = 0.0;
        let mut m10 = 0.0;
        let mut m01 = 0.0;
        for (i, coord) in self.coords.iter().enumerate() {
            let w = weight(i);
            m00 += w;
            m10 += w * coord[0] as f64;
            m01 += w * coord[1] as f64;
        }
        let rbar = m10 / m00;
        let cbar = m01 / m00;

        // Central moments up to third order
        let (mut mu11, mut mu20, mut mu02) = (0.0, 0.0, 0.0);
        let (mut mu21, mut mu12, mut mu30, mut mu03) = (0.0, 0.0, 0.0, 0.0);
        for (i, coord) in self.coords.iter().enumerate() {
            let w = weight(i);
            let dr = coord[0] as f64 - rbar;
            let dc = coord[1] as f64 - cbar;
            mu11 += w * dr * dc;
            mu20 += w * dr * dr;
            mu02 += w * dc * dc;
            mu21 += w * dr * dr * dc;
            mu12 += w * dr * dc * dc;
            mu30 += w * dr * dr * dr;
            mu03 += w * dc * dc * dc;
        }

        // Scale-normalized moments: eta_pq = mu_pq / m00^(1 + (p+q)/2)
        let norm2 = m00 * m00;
        let norm3 = m00.powf(2.5);
        let e11 = mu11 / norm2;
        let e20 = mu20 / norm2;
        let e02 = mu02 / norm2;
        let e21 = mu21 / norm3;
        let e12 = mu12 / norm3;
        let e30 = mu30 / norm3;
        let e03 = mu03 / norm3;

        let s1 = e30 + e12;
        let s2 = e21 + e03;
        let d1 = e30 - 3.0 * e12;
        let d2 = 3.0 * e21 - e03;

        [
            e20 + e02,
            (e20 - e02).powi(2) + 4.0 * e11 * e11,
            d1 * d1 + d2 * d2,
            s1 * s1 + s2 * s2,
            d1 * s1 * (s1 * s1 - 3.0 * s2 * s2) + d2 * s2 * (3.0 * s1 * s1 - s2 * s2),
            (e20 - e02) * (s1 * s1 - s2 * s2) + 4.0 * e11 * s1 * s2,
            d2 * s1 * (s1 * s1 - 3.0 * s2 * s2) - d1 * s2 * (3.0 * s1 * s1 - s2 * s2),
        ]
    }

    fn intensity_mean(&self) -> f64 {
        self.intensities.iter().sum::<f64>() / self.count() as f64
    }

    fn intensity_std(&self) -> f64 {
        let mean = self.intensity_mean();
        let var = self
            .intensities
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / self.count() as f64;
        var.sqrt()
    }

    /// Number of exposed faces of the region's pixels (4-neighbourhood)
    fn boundary_edges(&self, labels: &LabelStack) -> usize {
        let dims = labels.shape().dims();
        let mut edges = 0usize;
        let mut neighbor = Vec::with_capacity(2);
        for coord in &self.coords {
            for axis in 0..2 {
                for step in [-1i64, 1] {
                    let pos = coord[axis] as i64 + step;
                    if pos < 0 || pos >= dims[axis] as i64 {
                        edges += 1;
                        continue;
                    }
                    neighbor.clear();
                    neighbor.extend_from_slice(coord);
                    neighbor[axis] = pos as usize;
                    // Checked above, get cannot fail
                    if labels.get(&neighbor).unwrap_or(0) != self.label {
                        edges += 1;
                    }
                }
            }
        }
        edges
    }
}

/// Compute a table of region properties
///
/// # Arguments
///
/// * `labels` - Label stack; each distinct nonzero value is one region
/// * `intensity` - Optional intensity stack of identical shape
/// * `properties` - Property names to compute (duplicates are ignored)
///
/// # Returns
///
/// A [`ResultsTable`] with one row per region, ordered by ascending label,
/// and columns ordered by sorted property name.
///
/// # Errors
///
/// Fails for unknown property names, 2-D-only properties on a stack that is
/// not 2-dimensional, intensity-weighted properties without an intensity
/// stack, or an intensity stack whose shape differs from the labels.
pub fn regionprops_table(
    labels: &LabelStack,
    intensity: Option<&ImageStack>,
    properties: &[&str],
) -> MeasureResult<ResultsTable> {
    let ndim = labels.ndim();

    if let Some(img) = intensity {
        if img.shape() != labels.shape() {
            return Err(MeasureError::ShapeMismatch {
                labels: labels.shape().dims().to_vec(),
                intensity: img.shape().dims().to_vec(),
            });
        }
    }

    let mut selected: Vec<&str> = properties.to_vec();
    selected.sort_unstable();
    selected.dedup();
    for &name in &selected {
        validate_property(name, ndim, intensity.is_some())?;
    }

    let regions = collect_regions(labels, intensity);

    let mut columns = Vec::new();
    for &name in &selected {
        append_property(&mut columns, name, &regions, labels, ndim);
    }

    Ok(ResultsTable { columns })
}

fn validate_property(name: &str, ndim: usize, has_intensity: bool) -> MeasureResult<()> {
    if !is_known_property(name) {
        return Err(MeasureError::UnknownProperty(name.to_string()));
    }
    if is_2d_only(name) && ndim != 2 {
        return Err(MeasureError::NotTwoDimensional {
            property: name.to_string(),
            ndim,
        });
    }
    if needs_intensity(name) && !has_intensity {
        return Err(MeasureError::MissingIntensity {
            property: name.to_string(),
        });
    }
    Ok(())
}

fn collect_regions(labels: &LabelStack, intensity: Option<&ImageStack>) -> Vec<Region> {
    let mut map: BTreeMap<u32, Region> = BTreeMap::new();
    for (off, coord) in labels.shape().indices().enumerate() {
        let value = labels.data()[off];
        if value == 0 {
            continue;
        }
        let region = map.entry(value).or_insert_with(|| Region {
            label: value,
            coords: Vec::new(),
            intensities: Vec::new(),
        });
        region.coords.push(coord);
        if let Some(img) = intensity {
            region.intensities.push(img.data()[off]);
        }
    }
    map.into_values().collect()
}

fn push_scalar(columns: &mut Vec<Column>, name: &str, values: Vec<f64>) {
    columns.push(Column {
        name: name.to_string(),
        values,
    });
}

fn push_vector(columns: &mut Vec<Column>, name: &str, rows: Vec<Vec<f64>>, width: usize) {
    for i in 0..width {
        columns.push(Column {
            name: format!("{}-{}", name, i),
            values: rows.iter().map(|row| row[i]).collect(),
        });
    }
}

fn append_property(
    columns: &mut Vec<Column>,
    name: &str,
    regions: &[Region],
    labels: &LabelStack,
    ndim: usize,
) {
    match name {
        "area" | "num_pixels" => {
            push_scalar(columns, name, regions.iter().map(|r| r.count() as f64).collect());
        }
        "area_bbox" => {
            let values = regions
                .iter()
                .map(|r| {
                    let (min, max) = r.bbox(ndim);
                    (0..ndim).map(|a| (max[a] - min[a]) as f64).product()
                })
                .collect();
            push_scalar(columns, name, values);
        }
        "bbox" => {
            let rows: Vec<Vec<f64>> = regions
                .iter()
                .map(|r| {
                    let (min, max) = r.bbox(ndim);
                    min.iter()
                        .map(|&v| v as f64)
                        .chain(max.iter().map(|&v| v as f64))
                        .collect()
                })
                .collect();
            push_vector(columns, name, rows, 2 * ndim);
        }
        "centroid" => {
            let rows = regions.iter().map(|r| r.centroid(ndim)).collect();
            push_vector(columns, name, rows, ndim);
        }
        "centroid_local" => {
            let rows = regions
                .iter()
                .map(|r| {
                    let centroid = r.centroid(ndim);
                    let (min, _) = r.bbox(ndim);
                    (0..ndim).map(|a| centroid[a] - min[a] as f64).collect()
                })
                .collect();
            push_vector(columns, name, rows, ndim);
        }
        "centroid_weighted" => {
            let rows = regions.iter().map(|r| r.centroid_weighted(ndim)).collect();
            push_vector(columns, name, rows, ndim);
        }
        "eccentricity" => {
            let values = regions
                .iter()
                .map(|r| {
                    let (a, b, c) = r.covariance();
                    let common = (((a - c) / 2.0).powi(2) + b * b).sqrt();
                    let l1 = (a + c) / 2.0 + common;
                    let l2 = (a + c) / 2.0 - common;
                    if l1 == 0.0 { 0.0 } else { (1.0 - l2 / l1).sqrt() }
                })
                .collect();
            push_scalar(columns, name, values);
        }
        "equivalent_diameter_area" => {
            let values = regions
                .iter()
                .map(|r| equivalent_diameter(r.count() as f64, ndim))
                .collect();
            push_scalar(columns, name, values);
        }
        "extent" => {
            let values = regions
                .iter()
                .map(|r| {
                    let (min, max) = r.bbox(ndim);
                    let volume: f64 = (0..ndim).map(|a| (max[a] - min[a]) as f64).product();
                    r.count() as f64 / volume
                })
                .collect();
            push_scalar(columns, name, values);
        }
        "intensity_max" => {
            let values = regions
                .iter()
                .map(|r| r.intensities.iter().copied().fold(f64::NEG_INFINITY, f64::max))
                .collect();
            push_scalar(columns, name, values);
        }
        "intensity_mean" => {
            push_scalar(columns, name, regions.iter().map(|r| r.intensity_mean()).collect());
        }
        "intensity_min" => {
            let values = regions
                .iter()
                .map(|r| r.intensities.iter().copied().fold(f64::INFINITY, f64::min))
                .collect();
            push_scalar(columns, name, values);
        }
        "intensity_std" => {
            push_scalar(columns, name, regions.iter().map(|r| r.intensity_std()).collect());
        }
        "label" => {
            push_scalar(columns, name, regions.iter().map(|r| r.label as f64).collect());
        }
        "moments_hu" => {
            let rows = regions.iter().map(|r| r.hu_moments(false).to_vec()).collect();
            push_vector(columns, name, rows, 7);
        }
        "moments_weighted_hu" => {
            let rows = regions.iter().map(|r| r.hu_moments(true).to_vec()).collect();
            push_vector(columns, name, rows, 7);
        }
        "orientation" => {
            // Angle between the row axis and the major axis, in (-pi/2, pi/2]
            let values = regions
                .iter()
                .map(|r| {
                    let (a, b, c) = r.covariance();
                    0.5 * (2.0 * b).atan2(a - c)
                })
                .collect();
            push_scalar(columns, name, values);
        }
        "perimeter" => {
            let values = regions
                .iter()
                .map(|r| r.boundary_edges(labels) as f64)
                .collect();
            push_scalar(columns, name, values);
        }
        "perimeter_crofton" => {
            // Cauchy-Crofton estimate from axis-aligned boundary crossings
            let values = regions
                .iter()
                .map(|r| PI / 4.0 * r.boundary_edges(labels) as f64)
                .collect();
            push_scalar(columns, name, values);
        }
        // Names are validated before dispatch
        _ => unreachable!("unvalidated property: {}", name),
    }
}

/// Diameter of the d-ball with the same content as `count` pixels
fn equivalent_diameter(count: f64, ndim: usize) -> f64 {
    let d = ndim as f64;
    2.0 * (count * gamma_half(ndim + 2) / PI.powf(d / 2.0)).powf(1.0 / d)
}

/// Gamma(k/2) for integer k >= 1
fn gamma_half(k: usize) -> f64 {
    if k % 2 == 0 {
        factorial(k / 2 - 1)
    } else {
        let m = (k - 1) / 2;
        factorial(2 * m) / (4.0f64.powi(m as i32) * factorial(m)) * PI.sqrt()
    }
}

fn factorial(n: usize) -> f64 {
    (1..=n).map(|i| i as f64).product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamina_core::Shape;
    use lamina_test::{image_2d, labels_2d};

    fn two_point_labels() -> LabelStack {
        labels_2d(&[
            &[0, 0, 0, 0],
            &[0, 1, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 2, 0],
            &[0, 0, 0, 0],
        ])
    }

    fn two_point_intensity() -> ImageStack {
        image_2d(&[
            &[0.0, 0.0, 0.0, 0.0],
            &[0.0, 6.0, 0.0, 0.0],
            &[0.0, 0.0, 0.0, 0.0],
            &[0.0, 0.0, 7.0, 0.0],
            &[0.0, 0.0, 0.0, 0.0],
        ])
    }

    #[test]
    fn test_two_point_table() {
        let labels = two_point_labels();
        let intensity = two_point_intensity();
        let table = regionprops_table(
            &labels,
            Some(&intensity),
            &["area", "label", "intensity_mean"],
        )
        .unwrap();

        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.column_names(), vec!["area", "intensity_mean", "label"]);
        assert_eq!(table.column("area").unwrap(), &[1.0, 1.0]);
        assert_eq!(table.column("intensity_mean").unwrap(), &[6.0, 7.0]);
        assert_eq!(table.column("label").unwrap(), &[1.0, 2.0]);
    }

    #[test]
    fn test_centroid_and_bbox_of_block() {
        let labels = labels_2d(&[
            &[0, 0, 0, 0],
            &[0, 1, 1, 0],
            &[0, 1, 1, 0],
            &[0, 0, 0, 0],
        ]);
        let table = regionprops_table(&labels, None, &["centroid", "bbox", "extent"]).unwrap();

        assert_eq!(table.column("centroid-0").unwrap(), &[1.5]);
        assert_eq!(table.column("centroid-1").unwrap(), &[1.5]);
        assert_eq!(table.column("bbox-0").unwrap(), &[1.0]);
        assert_eq!(table.column("bbox-1").unwrap(), &[1.0]);
        assert_eq!(table.column("bbox-2").unwrap(), &[3.0]);
        assert_eq!(table.column("bbox-3").unwrap(), &[3.0]);
        assert_eq!(table.column("extent").unwrap(), &[1.0]);
    }

    #[test]
    fn test_perimeter_of_block() {
        let labels = labels_2d(&[
            &[0, 0, 0, 0],
            &[0, 1, 1, 0],
            &[0, 1, 1, 0],
            &[0, 0, 0, 0],
        ]);
        let table =
            regionprops_table(&labels, None, &["perimeter", "perimeter_crofton"]).unwrap();

        // 2x2 block exposes 8 faces
        assert_eq!(table.column("perimeter").unwrap(), &[8.0]);
        let crofton = table.column("perimeter_crofton").unwrap()[0];
        assert!((crofton - 2.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_perimeter_counts_image_border() {
        let labels = labels_2d(&[&[1, 1], &[1, 1]]);
        let table = regionprops_table(&labels, None, &["perimeter"]).unwrap();
        assert_eq!(table.column("perimeter").unwrap(), &[8.0]);
    }

    #[test]
    fn test_eccentricity_extremes() {
        // A single pixel has no spread in any direction
        let dot = labels_2d(&[&[0, 0], &[0, 1]]);
        let table = regionprops_table(&dot, None, &["eccentricity"]).unwrap();
        assert_eq!(table.column("eccentricity").unwrap(), &[0.0]);

        // A horizontal line is maximally elongated
        let line = labels_2d(&[&[0, 0, 0, 0, 0], &[1, 1, 1, 1, 1], &[0, 0, 0, 0, 0]]);
        let table = regionprops_table(&line, None, &["eccentricity", "orientation"]).unwrap();
        assert!((table.column("eccentricity").unwrap()[0] - 1.0).abs() < 1e-12);
        // Spread is entirely along the column axis
        let orientation = table.column("orientation").unwrap()[0];
        assert!((orientation.abs() - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_equivalent_diameter_2d_and_3d() {
        // 2-D: sqrt(4 * area / pi)
        assert!((equivalent_diameter(PI, 2) - 2.0).abs() < 1e-12);
        // 3-D: cbrt(6 * volume / pi)
        assert!((equivalent_diameter(PI / 6.0 * 8.0, 3) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_intensity_statistics() {
        let labels = labels_2d(&[&[1, 1, 1, 0]]);
        let intensity = image_2d(&[&[2.0, 4.0, 6.0, 9.0]]);
        let table = regionprops_table(
            &labels,
            Some(&intensity),
            &["intensity_min", "intensity_max", "intensity_mean", "intensity_std"],
        )
        .unwrap();

        assert_eq!(table.column("intensity_min").unwrap(), &[2.0]);
        assert_eq!(table.column("intensity_max").unwrap(), &[6.0]);
        assert_eq!(table.column("intensity_mean").unwrap(), &[4.0]);
        let std = table.column("intensity_std").unwrap()[0];
        assert!((std - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_centroid() {
        let labels = labels_2d(&[&[1, 1]]);
        let intensity = image_2d(&[&[1.0, 3.0]]);
        let table =
            regionprops_table(&labels, Some(&intensity), &["centroid_weighted"]).unwrap();
        assert_eq!(table.column("centroid_weighted-0").unwrap(), &[0.0]);
        assert_eq!(table.column("centroid_weighted-1").unwrap(), &[0.75]);
    }

    #[test]
    fn test_hu_moments_translation_invariant() {
        let a = labels_2d(&[
            &[1, 1, 0, 0, 0],
            &[1, 1, 1, 0, 0],
            &[0, 0, 0, 0, 0],
        ]);
        let b = labels_2d(&[
            &[0, 0, 0, 0, 0],
            &[0, 0, 1, 1, 0],
            &[0, 0, 1, 1, 1],
        ]);
        let ta = regionprops_table(&a, None, &["moments_hu"]).unwrap();
        let tb = regionprops_table(&b, None, &["moments_hu"]).unwrap();
        for i in 0..7 {
            let name = format!("moments_hu-{}", i);
            let va = ta.column(&name).unwrap()[0];
            let vb = tb.column(&name).unwrap()[0];
            assert!((va - vb).abs() < 1e-12, "hu[{}]: {} vs {}", i, va, vb);
        }
    }

    #[test]
    fn test_unknown_property_rejected() {
        let labels = two_point_labels();
        let err = regionprops_table(&labels, None, &["sparkle"]).unwrap_err();
        assert!(matches!(err, MeasureError::UnknownProperty(_)));
    }

    #[test]
    fn test_2d_only_property_rejected_on_3d() {
        let shape = Shape::new(&[2, 2, 2]).unwrap();
        let labels = LabelStack::from_vec(shape, vec![0, 1, 0, 0, 0, 0, 1, 0]).unwrap();
        let err = regionprops_table(&labels, None, &["perimeter"]).unwrap_err();
        assert!(matches!(err, MeasureError::NotTwoDimensional { .. }));
    }

    #[test]
    fn test_intensity_property_needs_intensity() {
        let labels = two_point_labels();
        let err = regionprops_table(&labels, None, &["intensity_mean"]).unwrap_err();
        assert!(matches!(err, MeasureError::MissingIntensity { .. }));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let labels = labels_2d(&[&[1, 0], &[0, 2]]);
        let intensity = image_2d(&[&[1.0, 2.0, 3.0]]);
        let err = regionprops_table(&labels, Some(&intensity), &["area"]).unwrap_err();
        assert!(matches!(err, MeasureError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_3d_region_measurements() {
        let shape = Shape::new(&[2, 2, 2]).unwrap();
        let labels = LabelStack::from_vec(shape, vec![1, 1, 0, 0, 1, 1, 0, 0]).unwrap();
        let table =
            regionprops_table(&labels, None, &["area", "centroid", "area_bbox"]).unwrap();
        assert_eq!(table.column("area").unwrap(), &[4.0]);
        assert_eq!(table.column("centroid-0").unwrap(), &[0.5]);
        assert_eq!(table.column("centroid-1").unwrap(), &[0.0]);
        assert_eq!(table.column("centroid-2").unwrap(), &[0.5]);
        assert_eq!(table.column("area_bbox").unwrap(), &[4.0]);
    }

    #[test]
    fn test_duplicate_properties_collapse() {
        let labels = two_point_labels();
        let table = regionprops_table(&labels, None, &["area", "area"]).unwrap();
        assert_eq!(table.column_names(), vec!["area"]);
    }
}
