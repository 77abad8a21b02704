use chrono::{TimeZone, Utc};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use rask_log_enricher::LogEvent;
use rask_log_enricher::enricher::{BuilderConfig, MessageBuilder};
use rask_log_enricher::parser::{is_json_object, split_image};

fn sample_event(raw_data: &str) -> LogEvent {
    LogEvent {
        container_id: "6feffd9428dc".to_string(),
        container_name: "/my_app".to_string(),
        hostname: "container_hostname".to_string(),
        image: "my.registry.host:443/path/to/image:1234".to_string(),
        source: "stdout".to_string(),
        raw_data: raw_data.to_string(),
        timestamp: Utc.timestamp_opt(1_453_818_496, 595_000_000).unwrap(),
    }
}

fn benchmark_message_builder(c: &mut Criterion) {
    let builder = MessageBuilder::new(BuilderConfig::new("tst-mesos-slave-001", "my-type"));
    let plain = sample_event("192.168.1.1 - - [25/Dec/2023:10:00:00 +0000] \"GET / HTTP/1.1\" 200 612");
    let structured = sample_event(
        r#"{"logtype": "applog", "message":"something happened", "level": "DEBUG", "file": "debug.go", "line": 42}"#,
    );

    let mut group = c.benchmark_group("message_builder");
    group.throughput(Throughput::Elements(1));

    group.bench_function("plain_text", |b| {
        b.iter(|| builder.build_message(std::hint::black_box(&plain)));
    });

    group.bench_function("json_payload", |b| {
        b.iter(|| builder.build_message(std::hint::black_box(&structured)));
    });

    group.finish();
}

fn benchmark_parsers(c: &mut Criterion) {
    c.bench_function("split_image", |b| {
        b.iter(|| split_image(std::hint::black_box("my.registry.host:443/path/to/image:3.1.4")));
    });

    c.bench_function("is_json_object", |b| {
        b.iter(|| is_json_object(std::hint::black_box(r#"{"level":"info","msg":"ok"}"#)));
    });
}

criterion_group!(benches, benchmark_message_builder, benchmark_parsers);
criterion_main!(benches);
