use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use geo::Point;
use roadgraph_core::prelude::*;

/// Square grid with unit spacing, every fifth row one-way eastbound
fn build_grid(side: u32) -> RoadNetwork {
    let mut builder = RoadNetworkBuilder::with_capacity(
        (side * side) as usize,
        (2 * side * side) as usize,
        2,
    );
    builder.add_road(1, "Avenue", false).unwrap();
    builder.add_road(2, "Eastbound", true).unwrap();

    for row in 0..side {
        for col in 0..side {
            builder
                .add_intersection(row * side + col, Point::new(f64::from(col), f64::from(row)))
                .unwrap();
        }
    }
    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            if col + 1 < side {
                let road = if row % 5 == 0 { 2 } else { 1 };
                builder.add_segment(road, id, id + 1, 1.1, None);
            }
            if row + 1 < side {
                builder.add_segment(1, id, id + side, 1.1, None);
            }
        }
    }
    builder.build().expect("grid network")
}

fn bench_astar(c: &mut Criterion) {
    let mut group = c.benchmark_group("astar");

    for &side in &[50u32, 200u32] {
        let network = build_grid(side);
        let target = side * side - 1;

        group.bench_with_input(BenchmarkId::new("corner_to_corner", side), &network, |b, net| {
            b.iter(|| {
                find_route(
                    net,
                    black_box(0),
                    black_box(target),
                    &Planar,
                    &AStarOptions::default(),
                )
                .expect("valid ids")
            })
        });
    }

    group.finish();
}

fn bench_cut_vertices(c: &mut Criterion) {
    let mut group = c.benchmark_group("cut_vertices");

    for &side in &[50u32, 200u32] {
        let network = build_grid(side);
        group.bench_with_input(BenchmarkId::new("whole_network", side), &network, |b, net| {
            b.iter(|| black_box(find_all_cut_vertices(net)))
        });
    }

    group.finish();
}

fn bench_matrix(c: &mut Criterion) {
    let network = build_grid(100);
    let ids: Vec<u32> = (0..20).map(|i| i * 499).collect();

    c.bench_function("route_length_matrix_20x20", |b| {
        b.iter(|| {
            route_length_matrix(&network, &ids, &ids, &Planar, &AStarOptions::default())
                .expect("valid ids")
        })
    });
}

criterion_group!(benches, bench_astar, bench_cut_vertices, bench_matrix);
criterion_main!(benches);
