use criterion::{black_box, criterion_group, criterion_main, Criterion};

use isocontour::contour::extract;
use isocontour::cycle::discover;
use isocontour::edge_index::Shape;
use isocontour::stitch::{run, StitchCfg, StitchStrategy};
use isocontour::testutil::{random_circles_field, ReplayToken};

fn bench_stitch(c: &mut Criterion) {
    let shape = Shape::new(160, 160);
    let field = random_circles_field(shape, 12, ReplayToken(7));

    let mut group = c.benchmark_group("stitch");
    for strategy in [StitchStrategy::Localized, StitchStrategy::Exhaustive] {
        let label = match strategy {
            StitchStrategy::Localized => "localized",
            StitchStrategy::Exhaustive => "exhaustive",
        };
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut g = extract(&field);
                discover(&mut g, &field);
                run(&mut g, StitchCfg { strategy, honor_cheaper_topology: false }).unwrap();
                black_box(g.alive_cycle_count());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stitch);
criterion_main!(benches);
