use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tw_elm_core::{Config, Generator};

// Shape of a typical utility framework build: every utility in every variant.
fn utility_stylesheet() -> String {
    let variants = ["", "sm\\:", "md\\:", "hover\\:", "lg\\:focus\\:"];
    let utilities = [
        "mx-auto",
        "-m-1",
        "w-1\\/2",
        "col-gap-1\\.5",
        "bg-blue-500",
        "translate-x-1",
    ];
    let mut style = String::new();
    for (i, variant) in variants.iter().enumerate() {
        for utility in utilities {
            let pseudo = if variant.starts_with("hover") { ":hover" } else { "" };
            style.push_str(&format!(".{variant}{utility}{pseudo} {{ order: {i}; }}\n"));
        }
    }
    style
}

fn pipeline_benchmark(c: &mut Criterion) {
    let style = utility_stylesheet();
    let selectors = tw_elm_core::collect_selectors(&style).unwrap();

    c.bench_function("selectors to module", |b| {
        b.iter(|| {
            let mut generator = Generator::new(Config::default());
            generator.process_rules(black_box(&selectors));
            generator.finish()
        })
    });

    c.bench_function("stylesheet to module", |b| {
        b.iter(|| {
            let mut generator = Generator::new(Config::default());
            generator.process_stylesheet(black_box(&style)).unwrap();
            generator.finish()
        })
    });
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
