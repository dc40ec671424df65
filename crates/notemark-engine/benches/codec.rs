use criterion::{Criterion, criterion_group, criterion_main};
use notemark_engine::{generate, normalize, parse};

/// Builds a synthetic note with `n` repetitions of a representative block mix.
fn synthetic_note(n: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        out.push_str(&format!(
            "<text indent=\"0\">paragraph {i} with <b>bold</b> and &amp; entities</text>\n\
             <bullet indent=\"1\">bullet {i}</bullet>\n\
             <order indent=\"1\" inputnumber=\"{i}\">ordered</order>\n\
             <input type=\"checkbox\" indent=\"0\" level=\"1\" checked=\"false\">task {i}</input>\n\
             <img fileid=\"img{i}\" imgshow=\"0\" imgdes=\"\" width=\"500\" height=\"400\"/>\n\
             <quote><text indent=\"0\">quoted {i}</text></quote>\n"
        ));
    }
    out
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    group.sample_size(10);

    let content = synthetic_note(100);
    group.bench_function("parse", |b| {
        b.iter(|| {
            let doc = parse(std::hint::black_box(&content)).unwrap();
            std::hint::black_box(doc);
        });
    });

    let doc = parse(&content).unwrap();
    group.bench_function("generate", |b| {
        b.iter(|| {
            let markup = generate(std::hint::black_box(&doc));
            std::hint::black_box(markup);
        });
    });

    group.bench_function("normalize", |b| {
        b.iter(|| {
            let canonical = normalize(std::hint::black_box(&content));
            std::hint::black_box(canonical);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
