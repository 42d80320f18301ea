use criterion::{criterion_group, criterion_main, Criterion};
use tessera_buffer::PieceTree;

const CAP: u64 = 1_000_000;

fn line_block() -> Vec<u8> {
    let mut block = Vec::new();
    for i in 0..1000 {
        block.extend_from_slice(format!("line {} of some sample text\n", i).as_bytes());
    }
    block
}

fn insert(c: &mut Criterion) {
    c.bench_function("insert_start", |bench| {
        let mut pt = PieceTree::new();
        bench.iter(move || {
            if pt.len() >= CAP {
                pt = PieceTree::new();
            }

            pt.insert(0, b"a").unwrap()
        });
    });

    c.bench_function("insert_middle", |bench| {
        let mut pt = PieceTree::new();
        bench.iter(move || {
            if pt.len() >= CAP {
                pt = PieceTree::new();
            }

            pt.insert((pt.len() + 1) / 2, b"a").unwrap()
        });
    });

    c.bench_function("insert_end", |bench| {
        let mut pt = PieceTree::new();
        bench.iter(move || {
            if pt.len() >= CAP {
                pt = PieceTree::new();
            }

            pt.insert(pt.len(), b"a").unwrap()
        });
    });
}

fn full_pt() -> PieceTree {
    let block = line_block();
    let mut pt = PieceTree::new();
    while pt.len() < CAP {
        pt.insert(0, &block).unwrap();
    }
    pt
}

fn remove(c: &mut Criterion) {
    c.bench_function("remove_start", |bench| {
        let mut pt = full_pt();
        bench.iter(move || {
            if pt.is_empty() {
                pt = full_pt();
            }

            pt.remove(0..1).unwrap()
        });
    });

    c.bench_function("remove_middle", |bench| {
        let mut pt = full_pt();
        bench.iter(move || {
            let mid = (pt.len() + 1) / 2;
            if pt.is_empty() || mid + 1 > pt.len() {
                pt = full_pt();
            }

            let mid = (pt.len() + 1) / 2;
            pt.remove(mid..mid + 1).unwrap()
        });
    });
}

fn queries(c: &mut Criterion) {
    let pt = full_pt();
    let rows = pt.line_count();

    c.bench_function("position_at", |bench| {
        let mut pos = 0;
        bench.iter(|| {
            pos = (pos + 7919) % pt.len();
            pt.position_at(pos)
        });
    });

    c.bench_function("offset_at", |bench| {
        let mut row = 0;
        bench.iter(|| {
            row = (row + 13) % rows;
            pt.offset_at(row, 5)
        });
    });

    c.bench_function("line_content", |bench| {
        let mut row = 0;
        bench.iter(|| {
            row = (row + 13) % rows;
            pt.line_content(row)
        });
    });
}

criterion_group!(benches, insert, remove, queries);
criterion_main!(benches);
