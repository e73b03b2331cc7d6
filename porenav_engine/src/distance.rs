// Euclidean distance from every void voxel to the nearest solid voxel.
//
// Exact separable distance transform (Felzenszwalb & Huttenlocher, 2012):
// squared distances are propagated with a 1D lower-envelope-of-parabolas
// pass along x, then y, then z. Each pass is a set of independent lines, so
// every pass runs on the rayon pool:
//
// - x pass: rows are contiguous; `par_chunks_mut(nx)`.
// - y pass: each z-layer is contiguous; `par_chunks_mut(nx * ny)`, with the
//   y-lines of a layer handled inside the chunk.
// - z pass: columns are strided by `nx * ny`; each column is gathered,
//   transformed in parallel, and scattered back.
//
// Values are in voxel units, measured center to center. Solid voxels hold
// 0.0. A grid with no solid voxels at all holds `f64::INFINITY` in every
// void voxel; consumers treat infinity as "no constraining solid nearby".

use crate::grid::VoxelGrid;
use crate::types::Dims;
use rayon::prelude::*;

/// Per-voxel distance to the nearest solid voxel, in voxel units.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceField {
    dims: Dims,
    values: Vec<f64>,
}

impl DistanceField {
    /// Compute the field for `grid`.
    pub fn compute(grid: &VoxelGrid) -> Self {
        let dims = grid.dims();
        let mut sq: Vec<f64> = grid
            .solid_mask()
            .iter()
            .map(|&s| if s { 0.0 } else { f64::INFINITY })
            .collect();

        if grid.solid_count() > 0 {
            transform_x(dims, &mut sq);
            transform_y(dims, &mut sq);
            transform_z(dims, &mut sq);
        }

        let values = sq.into_par_iter().map(f64::sqrt).collect();
        Self { dims, values }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Distance at a flat index.
    pub fn get(&self, index: usize) -> f64 {
        self.values[index]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Largest value over the voxels selected by `mask`, or `None` if the
    /// mask selects nothing. Infinite when the field is unconstrained.
    pub fn max_over(&self, mask: &[bool]) -> Option<f64> {
        self.values
            .iter()
            .zip(mask)
            .filter(|&(_, &m)| m)
            .map(|(&v, _)| v)
            .reduce(f64::max)
    }
}

fn transform_x(dims: Dims, sq: &mut [f64]) {
    sq.par_chunks_mut(dims.nx).for_each(|row| {
        let mut scratch = Envelope::with_capacity(row.len());
        let input = row.to_vec();
        scratch.transform(&input, row);
    });
}

fn transform_y(dims: Dims, sq: &mut [f64]) {
    let (nx, ny) = (dims.nx, dims.ny);
    sq.par_chunks_mut(dims.layer_len()).for_each(|layer| {
        let mut scratch = Envelope::with_capacity(ny);
        let mut line = vec![0.0; ny];
        let mut out = vec![0.0; ny];
        for x in 0..nx {
            for y in 0..ny {
                line[y] = layer[x + y * nx];
            }
            scratch.transform(&line, &mut out);
            for y in 0..ny {
                layer[x + y * nx] = out[y];
            }
        }
    });
}

fn transform_z(dims: Dims, sq: &mut [f64]) {
    let layer = dims.layer_len();
    let nz = dims.nz;
    let columns: Vec<Vec<f64>> = (0..layer)
        .into_par_iter()
        .map(|c| {
            let line: Vec<f64> = (0..nz).map(|z| sq[c + z * layer]).collect();
            let mut out = vec![0.0; nz];
            Envelope::with_capacity(nz).transform(&line, &mut out);
            out
        })
        .collect();
    for (c, column) in columns.into_iter().enumerate() {
        for (z, v) in column.into_iter().enumerate() {
            sq[c + z * layer] = v;
        }
    }
}

/// Scratch space for the 1D squared-distance transform.
struct Envelope {
    /// Positions of the parabolas forming the lower envelope.
    vertices: Vec<usize>,
    /// Left boundary of each parabola's interval in the envelope.
    bounds: Vec<f64>,
}

impl Envelope {
    fn with_capacity(n: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(n),
            bounds: Vec::with_capacity(n),
        }
    }

    /// `out[q] = min_p (q - p)^2 + f[p]`. Infinite samples contribute no
    /// parabola; a line with no finite sample stays infinite.
    fn transform(&mut self, f: &[f64], out: &mut [f64]) {
        self.vertices.clear();
        self.bounds.clear();

        for (q, &fq) in f.iter().enumerate() {
            if fq.is_infinite() {
                continue;
            }
            loop {
                let Some(&p) = self.vertices.last() else {
                    self.vertices.push(q);
                    self.bounds.push(f64::NEG_INFINITY);
                    break;
                };
                let s = intersection(f, p, q);
                if self.bounds.last().is_some_and(|&b| s <= b) {
                    self.vertices.pop();
                    self.bounds.pop();
                    continue;
                }
                self.vertices.push(q);
                self.bounds.push(s);
                break;
            }
        }

        if self.vertices.is_empty() {
            out.fill(f64::INFINITY);
            return;
        }

        let mut k = 0;
        for (q, slot) in out.iter_mut().enumerate() {
            while k + 1 < self.vertices.len() && self.bounds[k + 1] < q as f64 {
                k += 1;
            }
            let p = self.vertices[k];
            let d = q as f64 - p as f64;
            *slot = d * d + f[p];
        }
    }
}

/// Abscissa where the parabolas rooted at `p` and `q` (p < q) intersect.
fn intersection(f: &[f64], p: usize, q: usize) -> f64 {
    let (pf, qf) = (p as f64, q as f64);
    ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * (qf - pf))
}
