use codec_core::loader;
use codec_core::model::Schema;
use codec_core::wire::{self, Instance, Value};
use codec_core::xml_ast::{AttributeNode, Document, MessageFormatNode};
use criterion::{Criterion, criterion_group, criterion_main};

fn gen_document(field_count: usize) -> Document {
    let attributes = (0..field_count)
        .map(|i| AttributeNode {
            name: format!("f{i}"),
            type_token: "uint".to_string(),
            length: Some(4),
            required: true,
        })
        .collect();

    Document {
        enum_types: vec![],
        message_formats: vec![MessageFormatNode {
            id: None,
            name: "Bench".to_string(),
            attributes,
        }],
    }
}

fn gen_instance(schema: &Schema) -> Instance {
    let message = &schema.message_formats[0];
    let mut instance = Instance::new();
    for field in &message.fields {
        instance.insert(field.name.clone(), Value::UInt(1));
    }
    instance
}

fn bench_load(c: &mut Criterion) {
    for &field_count in &[1usize, 10, 50, 100] {
        let doc = gen_document(field_count);
        c.bench_function(&format!("load_{field_count}_fields"), |b| {
            b.iter(|| loader::load(&doc, None).unwrap())
        });
    }
}

fn bench_wire_round_trip(c: &mut Criterion) {
    for &field_count in &[1usize, 10, 50, 100] {
        let doc = gen_document(field_count);
        let schema = loader::load(&doc, None).unwrap();
        let message = &schema.message_formats[0];
        let instance = gen_instance(&schema);

        c.bench_function(&format!("wire_round_trip_{field_count}_fields"), |b| {
            b.iter(|| {
                let bytes = wire::serialize_message(&schema, message, &instance);
                wire::deserialize_message(&schema, &bytes).unwrap()
            })
        });
    }
}

criterion_group!(benches, bench_load, bench_wire_round_trip);
criterion_main!(benches);
