//! SVG export (spec.md §6): render a set of closed polylines into a
//! `viewBox="0 0 1 1"` document, matching the isotropic unit-square
//! coordinates [`isocontour::edge_index::cartesian`] produces.
//!
//! References
//! - Ported from `original_source/src/cglib/type.py`
//!   (`data_structure_to_svg`, via `svgpathtools` in the original).

use std::path::Path;

use anyhow::{Context, Result};
use isocontour::polyline::Polyline;
use svg::node::element::path::Data;
use svg::node::element::Path as SvgPath;
use svg::Document;

pub fn write_svg(path: &Path, lines: &[Polyline]) -> Result<()> {
    let mut document = Document::new()
        .set("viewBox", (0, 0, 1, 1))
        .set("width", 1024)
        .set("height", 1024);

    for line in lines {
        if line.is_empty() {
            continue;
        }
        let mut data = Data::new().move_to((line[0].x, line[0].y));
        for p in &line[1..] {
            data = data.line_to((p.x, p.y));
        }
        data = data.close();
        let svg_path = SvgPath::new()
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", 0.002)
            .set("d", data);
        document = document.add(svg_path);
    }

    svg::save(path, &document).with_context(|| format!("writing {}", path.display()))
}
