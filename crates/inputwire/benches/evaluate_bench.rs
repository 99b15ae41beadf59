use criterion::{Criterion, black_box, criterion_group, criterion_main};
use inputwire::{Bindings, InputMap, InputValue, TemplateOptions, Variable, evaluate_parameters, parse_parameters};
use serde_json::json;

fn wide_parameters(width: usize) -> InputMap {
    (0..width)
        .map(|i| {
            let value = match i % 4 {
                0 => InputValue::from(i),
                1 => InputValue::variable(format!("v{i}")),
                2 => InputValue::NULL,
                _ => InputValue::List(vec![InputValue::from("a"), InputValue::from(Variable::new(format!("v{}", i - 2)))]),
            };
            (format!("arg{i}"), value)
        })
        .collect()
}

fn bindings_for(width: usize) -> Bindings {
    (0..width)
        .filter(|i| i % 4 == 1)
        .map(|i| (format!("v{i}"), json!({"id": i, "tags": ["x", "y"]})))
        .collect()
}

fn bench_evaluate(c: &mut Criterion) {
    let parameters = wide_parameters(256);
    let bindings = bindings_for(256);
    c.bench_function("evaluate_parameters/256", |b| {
        b.iter(|| evaluate_parameters(black_box(&parameters), black_box(&bindings)))
    });

    let template = json!({
        "episode": {"$var": "episode"},
        "review": {"stars": {"$var": "stars"}, "commentary": null, "tags": ["a", "b", {"$var": "tag"}]},
    });
    let options = TemplateOptions::default();
    c.bench_function("parse_parameters/review", |b| {
        b.iter(|| parse_parameters(black_box(&template), &options))
    });
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
