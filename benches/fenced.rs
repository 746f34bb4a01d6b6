use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fenced_mem::{RegionConfig, Register, SharedRegion};

fn bench_raw(c: &mut Criterion) {
    let mut slot: u32 = 0;
    let ptr = &mut slot as *mut u32;

    c.bench_function("fenced_write", |b| {
        b.iter(|| unsafe { fenced_mem::write(ptr, black_box(0xDEADBEEF)) })
    });
    c.bench_function("fenced_read", |b| {
        b.iter(|| black_box(unsafe { fenced_mem::read(ptr) }))
    });
}

fn bench_register(c: &mut Criterion) {
    let mut slot: u32 = 0;
    let reg = Register::from_mut(&mut slot);

    c.bench_function("register_write_read", |b| {
        b.iter(|| {
            reg.write(black_box(0xFFFF_FFFF));
            black_box(reg.read())
        })
    });
}

fn bench_shared_region(c: &mut Criterion) {
    let _ = SharedRegion::remove("bench_region");
    // SAFETY: no other mapping of the bench region exists
    let region = match unsafe { SharedRegion::create("bench_region", RegionConfig::default()) } {
        Ok(region) => region,
        Err(e) => {
            eprintln!("skipping shared region bench: {}", e);
            return;
        }
    };
    let reg = region.register(0).unwrap();

    c.bench_function("shared_region_write_read", |b| {
        b.iter(|| {
            reg.write(black_box(0x1234_5678));
            black_box(reg.read())
        })
    });
}

criterion_group!(benches, bench_raw, bench_register, bench_shared_region);
criterion_main!(benches);
