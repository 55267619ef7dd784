use bitstruct::{CompiledFormat, Value, byteswap};
use criterion::{Criterion, criterion_group, criterion_main};

fn gen_format(field_count: usize) -> CompiledFormat {
    let mut format = String::new();

    for i in 0..field_count {
        // Alternate widths and byte order so fields straddle byte boundaries
        if i % 2 == 0 {
            format.push_str(">u13");
        } else {
            format.push_str("<s7");
        }
    }

    CompiledFormat::compile(&format).unwrap()
}

fn gen_values(field_count: usize) -> Vec<Value> {
    (0..field_count)
        .map(|i| {
            if i % 2 == 0 {
                Value::Unsigned((i * 31 % 8192) as u128)
            } else {
                Value::Signed((i % 64) as i128 - 32)
            }
        })
        .collect()
}

fn bench_pack(c: &mut Criterion) {
    for &field_count in &[1usize, 10, 50, 100] {
        let format = gen_format(field_count);
        let values = gen_values(field_count);

        c.bench_function(&format!("pack_{}_fields", field_count), |b| {
            b.iter(|| {
                let _ = format.pack(&values).unwrap();
            })
        });
    }
}

fn bench_unpack(c: &mut Criterion) {
    for &field_count in &[1usize, 10, 50, 100] {
        let format = gen_format(field_count);
        let packed = format.pack(&gen_values(field_count)).unwrap();

        c.bench_function(&format!("unpack_{}_fields", field_count), |b| {
            b.iter(|| {
                let _ = format.unpack(&packed).unwrap();
            })
        });
    }
}

fn bench_compile(c: &mut Criterion) {
    let format = gen_format(100).to_string();

    c.bench_function("compile_100_fields", |b| {
        b.iter(|| {
            let _ = CompiledFormat::compile(&format).unwrap();
        })
    });
}

fn bench_byteswap(c: &mut Criterion) {
    let data: Vec<u8> = (0..=255).collect();
    let groups = "48".repeat(21);

    c.bench_function("byteswap_256_bytes", |b| {
        b.iter(|| {
            let _ = byteswap(&groups, &data).unwrap();
        })
    });
}

criterion_group!(benches, bench_pack, bench_unpack, bench_compile, bench_byteswap);
criterion_main!(benches);
