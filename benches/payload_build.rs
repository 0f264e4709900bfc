use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

use smsgate::config::{GatewayRegistry, SmsGateConfig};
use smsgate_core::{build_payload, prepare_mobile, GatewayTemplate, RawTemplate, Recipients};

fn json_wrapper_template() -> GatewayTemplate {
    let raw: RawTemplate = serde_json::from_value(json!({
        "method": "POST",
        "url": "https://control.msg91.example/api/v2/sendsms",
        "params": {
            "send_to_param_name": "to",
            "msg_param_name": "message",
            "others": {"authkey": "k1", "sender": "ACME", "route": "4"}
        },
        "json": true,
        "wrapper": "sms",
        "add_code": true
    }))
    .unwrap();
    GatewayTemplate::from_raw("msg91", raw).unwrap()
}

fn benchmark_payload_build(c: &mut Criterion) {
    let template = json_wrapper_template();
    let staged = BTreeMap::new();
    let extras = BTreeMap::new();

    let recipient_counts = vec![1usize, 10, 100];
    let mut group = c.benchmark_group("payload_build");

    for count in recipient_counts {
        let to = Recipients::Many((0..count).map(|i| format!("55500{:05}", i)).collect());

        group.bench_with_input(BenchmarkId::new("json_wrapper", count), &count, |b, _| {
            b.iter(|| {
                let mobile = prepare_mobile(&to, &template, "91");
                black_box(build_payload(&template, mobile, "Hello!", &staged, &extras))
            })
        });
    }
    group.finish();
}

fn benchmark_registry_resolve(c: &mut Criterion) {
    let mut gateways = HashMap::new();
    for i in 0..20 {
        let raw: RawTemplate = serde_json::from_value(json!({
            "url": format!("https://gw{}.example/send", i),
            "params": {"send_to_param_name": "to", "msg_param_name": "msg"}
        }))
        .unwrap();
        gateways.insert(format!("gateway-{}", i), raw);
    }
    let config = SmsGateConfig {
        default_gateway: Some("gateway-7".into()),
        country_code: "91".into(),
        gateways,
    };
    let registry = Arc::new(GatewayRegistry::from_config(config).unwrap());

    let mut group = c.benchmark_group("registry");

    group.bench_function("resolve_default", |b| {
        b.iter(|| black_box(registry.resolve(None).unwrap()))
    });

    group.bench_function("resolve_override", |b| {
        b.iter(|| black_box(registry.resolve(Some("gateway-13")).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, benchmark_payload_build, benchmark_registry_resolve);
criterion_main!(benches);
