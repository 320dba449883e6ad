use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use filepress_archive::{OutputStore, Packer, Unpacker};

// Text-like payload: compressible but not trivially so.
fn payload(size: usize) -> Vec<u8> {
    let words = ["archive ", "entry ", "deflate ", "scratch ", "bundle ", "ratio "];
    words
        .iter()
        .cycle()
        .enumerate()
        .flat_map(|(i, w)| {
            let mut bytes = w.as_bytes().to_vec();
            bytes.push(b'0' + (i % 10) as u8);
            bytes
        })
        .take(size)
        .collect()
}

fn bench_pack(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let packer = Packer::new(OutputStore::new(dir.path()).unwrap());

    let mut group = c.benchmark_group("pack");
    for size in [16 * 1024, 256 * 1024, 2 * 1024 * 1024] {
        let data = payload(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("single_entry", size), &data, |b, data| {
            b.iter(|| black_box(packer.pack("bench.txt", data)));
        });
    }
    group.finish();
}

fn bench_unpack(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let store = OutputStore::new(dir.path()).unwrap();
    let packer = Packer::new(store.clone());
    let unpacker = Unpacker::new(store.clone());

    let mut group = c.benchmark_group("unpack");
    for size in [16 * 1024, 256 * 1024, 2 * 1024 * 1024] {
        let stats = packer.pack("bench.txt", &payload(size));
        let archive = store.read(stats.output_name().unwrap()).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("rebundle", size), &archive, |b, archive| {
            b.iter(|| black_box(unpacker.unpack("bench.txt.zip", archive)));
        });
        store.clean_scratch().unwrap();
    }
    group.finish();
}

criterion_group!(benches, bench_pack, bench_unpack);
criterion_main!(benches);
