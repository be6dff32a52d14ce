//! Descriptor encode/decode throughput

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ream_member::{Address, AttributeValue, DescriptorCodec, LocalMember, MemberDescriptor};

fn populated_descriptor() -> MemberDescriptor {
    let member = LocalMember::new(Address::new("10.0.0.12", 5701));
    member.set_attribute("zone", "eu-west-1");
    member.set_attribute("rack", "r17");
    member.set_attribute("cores", 32);
    member.set_attribute("labels", vec![AttributeValue::from("ssd"), AttributeValue::from("gpu")]);
    MemberDescriptor::from_member(&member)
}

fn bench_encode(c: &mut Criterion) {
    let descriptor = populated_descriptor();
    c.bench_function("descriptor_encode", |b| {
        b.iter(|| DescriptorCodec::to_bytes(black_box(&descriptor)).unwrap())
    });
}

fn bench_decode(c: &mut Criterion) {
    let bytes = DescriptorCodec::to_bytes(&populated_descriptor()).unwrap();
    c.bench_function("descriptor_decode", |b| {
        b.iter(|| DescriptorCodec::from_bytes(black_box(bytes.clone())).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
