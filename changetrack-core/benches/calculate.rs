//! Benchmarks for parsing and change calculation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use changetrack_core::parser::{self, CodeSource};
use changetrack_core::{calculate_changes, ComparerOptions};

fn service_source(index: usize, extra_method: bool) -> String {
    let extra = if extra_method {
        "        public void Archive(int id) {}\n"
    } else {
        ""
    };
    format!(
        r#"
namespace Bench.Services
{{
    public class Service{index}<T> : IService<T> where T : class
    {{
        public const int Limit = 10;
        [JsonPropertyName("name")]
        public string Name {{ get; set; }}

        public Service{index}(string name) {{ Name = name; }}

        public T Find(int id) => default;
        public T Find(string key) => default;
        public void Save(T item, bool force = false) {{}}
{extra}    }}

    public enum Status{index} {{ Pending, Active = 5, Closed }}
}}
"#
    )
}

fn sources(count: usize, extra_method: bool) -> Vec<CodeSource> {
    (0..count)
        .map(|i| CodeSource::new(format!("Service{}.cs", i), service_source(i, extra_method)))
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let files = sources(100, false);
    c.bench_function("parse_100_files", |b| {
        b.iter(|| black_box(parser::parse_sources(&files, None).unwrap()))
    });
}

fn bench_calculate(c: &mut Criterion) {
    let old = parser::parse_sources(&sources(100, false), None).unwrap();
    let new = parser::parse_sources(&sources(100, true), None).unwrap();
    let options = ComparerOptions::default();

    c.bench_function("calculate_100_types", |b| {
        b.iter(|| black_box(calculate_changes(&old, &new, &options).change_type))
    });
    c.bench_function("calculate_identical", |b| {
        b.iter(|| black_box(calculate_changes(&old, &old, &options).results.len()))
    });
}

criterion_group!(benches, bench_parse, bench_calculate);
criterion_main!(benches);
