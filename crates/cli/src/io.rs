//! `.npy`/`.npz` boundary: load a scalar field from a `.npy` file and
//! persist/reload a stitched or unstitched [`Graph`] archive.
//!
//! The `-1`/`NaN` sentinel convention described in spec.md §6 is
//! materialized only here — the core library works exclusively with
//! `Option<EdgeId>`/`Option<Point>` (spec.md §3's representation notes).
//!
//! References
//! - Archive layout: spec.md §6 ("Persisted graph archive").
//! - Ported from `original_source/src/cglib/type.py`
//!   (`numpy_to_field`, `data_structure_to_numpy`, `numpy_contour_to_data_structure`).

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use ndarray::{Array1, Array2};
use ndarray_npy::{NpzReader, NpzWriter, ReadNpyExt, WriteNpyExt};

use isocontour::contour::Field;
use isocontour::edge_index::Shape;
use isocontour::graph::{CycleRecord, EdgeId, Graph};

/// Load a scalar field from a `.npy` file. Numpy's row-major `(rows,
/// cols)` convention maps rows to `y` and columns to `x`; the field is
/// transposed into this crate's `x * H + y` layout on the way in.
pub fn load_field(path: &Path) -> Result<Field> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let arr = Array2::<f64>::read_npy(file).with_context(|| format!("reading {}", path.display()))?;
    let (h, w) = arr.dim();
    let mut data = vec![0.0; w * h];
    for y in 0..h {
        for x in 0..w {
            data[x * h + y] = arr[[y, x]];
        }
    }
    Ok(Field::new(Shape::new(w, h), data))
}

const NONE_SENTINEL: i64 = -1;

fn edge_to_i64(e: Option<EdgeId>) -> i64 {
    e.map(|e| e.index() as i64).unwrap_or(NONE_SENTINEL)
}

fn i64_to_edge(v: i64) -> Option<EdgeId> {
    if v < 0 {
        None
    } else {
        Some(EdgeId(v as usize))
    }
}

/// Persist a [`Graph`] to a `.npz` archive: `shape`, `next_edge`,
/// `prev_edge`, `cycle_index`, `points_x`/`points_y`, and one
/// `cycle_start`/`cycle_length` pair per catalog entry (tombstones
/// included, so cycle ids stay stable across a save/load round trip).
pub fn save_graph(path: &Path, graph: &Graph) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut npz = NpzWriter::new(file);

    let shape: Array1<i64> = Array1::from(vec![graph.shape.w as i64, graph.shape.h as i64]);
    npz.add_array("shape", &shape)?;

    let next: Array1<i64> = graph.next_edge.iter().map(|e| edge_to_i64(*e)).collect();
    npz.add_array("next_edge", &next)?;
    let prev: Array1<i64> = graph.prev_edge.iter().map(|e| edge_to_i64(*e)).collect();
    npz.add_array("prev_edge", &prev)?;
    let cycle_index: Array1<i64> = graph
        .cycle_index
        .iter()
        .map(|c| c.map(|k| k as i64).unwrap_or(NONE_SENTINEL))
        .collect();
    npz.add_array("cycle_index", &cycle_index)?;

    let points_x: Array1<f64> = graph.points.iter().map(|p| p.map(|p| p.x).unwrap_or(f64::NAN)).collect();
    let points_y: Array1<f64> = graph.points.iter().map(|p| p.map(|p| p.y).unwrap_or(f64::NAN)).collect();
    npz.add_array("points_x", &points_x)?;
    npz.add_array("points_y", &points_y)?;

    let cycle_start: Array1<i64> = graph
        .cycles
        .iter()
        .map(|c| if c.is_tombstone() { NONE_SENTINEL } else { c.start_edge.index() as i64 })
        .collect();
    let cycle_length: Array1<i64> = graph.cycles.iter().map(|c| c.length as i64).collect();
    npz.add_array("cycle_start", &cycle_start)?;
    npz.add_array("cycle_length", &cycle_length)?;

    npz.finish()?;
    Ok(())
}

/// Inverse of [`save_graph`].
pub fn load_graph(path: &Path) -> Result<Graph> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut npz = NpzReader::new(file)?;

    let shape_arr: Array1<i64> = npz.by_name("shape")?;
    let shape = Shape::new(shape_arr[0] as usize, shape_arr[1] as usize);

    let next: Array1<i64> = npz.by_name("next_edge")?;
    let prev: Array1<i64> = npz.by_name("prev_edge")?;
    let cycle_index: Array1<i64> = npz.by_name("cycle_index")?;
    let points_x: Array1<f64> = npz.by_name("points_x")?;
    let points_y: Array1<f64> = npz.by_name("points_y")?;
    let cycle_start: Array1<i64> = npz.by_name("cycle_start")?;
    let cycle_length: Array1<i64> = npz.by_name("cycle_length")?;

    let points = points_x
        .iter()
        .zip(points_y.iter())
        .map(|(&x, &y)| if x.is_nan() { None } else { Some(isocontour::graph::Point::new(x, y)) })
        .collect();
    let cycles = cycle_start
        .iter()
        .zip(cycle_length.iter())
        .map(|(&s, &len)| CycleRecord {
            start_edge: EdgeId(s.max(0) as usize),
            length: len as usize,
        })
        .collect();

    Ok(Graph {
        shape,
        points,
        next_edge: next.iter().map(|&v| i64_to_edge(v)).collect(),
        prev_edge: prev.iter().map(|&v| i64_to_edge(v)).collect(),
        cycle_index: cycle_index.iter().map(|&v| if v < 0 { None } else { Some(v as usize) }).collect(),
        cycles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use isocontour::contour::extract;
    use isocontour::cycle::discover;
    use isocontour::stitch::{run, StitchCfg};

    #[test]
    fn graph_round_trips_through_npz() {
        let shape = Shape::new(24, 24);
        let scale = shape.w.max(shape.h) as f64;
        let mut data = vec![0.0; shape.w * shape.h];
        for x in 0..shape.w {
            for y in 0..shape.h {
                let px = x as f64 / scale;
                let py = y as f64 / scale;
                data[x * shape.h + y] = 0.3 - ((px - 0.5).powi(2) + (py - 0.5).powi(2)).sqrt();
            }
        }
        let field = Field::new(shape, data);
        let mut g = extract(&field);
        discover(&mut g, &field);
        run(&mut g, StitchCfg::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.npz");
        save_graph(&path, &g).unwrap();
        let loaded = load_graph(&path).unwrap();

        assert_eq!(loaded.shape, g.shape);
        assert_eq!(loaded.next_edge, g.next_edge);
        assert_eq!(loaded.prev_edge, g.prev_edge);
        assert_eq!(loaded.cycle_index, g.cycle_index);
        assert_eq!(loaded.cycles, g.cycles);
    }
}
