//! Integration tests for the wire contract the native reader depends on.

use charon_marshal::{
    decode_identifier, decode_position, Entity, EntityKind, LookValue, PacketEncoder,
    PositionRecord, RoomObjectPacket, SharedBuffer, Terrain, TypeTagRegistry, WorldPosition,
    RAW_ID_LEN,
};

fn read_record(bytes: &[u8], index: usize) -> &[u8] {
    let start = index * RoomObjectPacket::SIZE;
    &bytes[start..start + RoomObjectPacket::SIZE]
}

#[test]
fn truncation_leaves_tail_untouched() {
    // Buffer sized for exactly K = 3 records, N = 5 encodable inputs.
    const K: usize = 3;
    let capacity = RoomObjectPacket::SIZE * K + 13; // deliberately not a multiple
    let mut buffer = SharedBuffer::new();
    buffer.allocate(capacity).unwrap();
    let tags = TypeTagRegistry::with_standard_kinds();

    let values: Vec<LookValue> = (0..5)
        .map(|i| {
            LookValue::Object(
                Entity::new(EntityKind::Spawn, WorldPosition::new(i, i, "W5N5"))
                    .with_id(format!("spawn{i}"))
                    .with_hits(5000, 5000),
            )
        })
        .collect();

    let mut encoder = PacketEncoder::new(&mut buffer, &tags).unwrap();
    let outcome = encoder.encode_entities(&values);
    assert_eq!(outcome.written, K);
    assert!(outcome.truncated);

    // Everything past the last whole record is still zero.
    let tail = &buffer.as_bytes()[K * RoomObjectPacket::SIZE..];
    assert!(tail.iter().all(|&b| b == 0));
}

#[test]
fn order_survives_skips() {
    let mut buffer = SharedBuffer::new();
    buffer.allocate(RoomObjectPacket::SIZE * 8).unwrap();
    let tags = TypeTagRegistry::with_standard_kinds();

    let a = Entity::new(EntityKind::Creep, WorldPosition::new(1, 1, "W1N1")).with_id("aaaa");
    let c = Entity::new(EntityKind::Tower, WorldPosition::new(3, 3, "W1N1")).with_id("cccc");
    let values = [
        LookValue::Object(a),
        LookValue::Terrain(Terrain::Swamp),
        LookValue::Object(c),
    ];

    let mut encoder = PacketEncoder::new(&mut buffer, &tags).unwrap();
    let outcome = encoder.encode_entities(&values);
    assert_eq!(outcome.written, 2);

    let bytes = buffer.as_bytes();
    let first_id: [u8; RAW_ID_LEN] = read_record(bytes, 0)[..RAW_ID_LEN].try_into().unwrap();
    let second_id: [u8; RAW_ID_LEN] = read_record(bytes, 1)[..RAW_ID_LEN].try_into().unwrap();
    assert_eq!(decode_identifier(&first_id), "aaaa");
    assert_eq!(decode_identifier(&second_id), "cccc");
}

#[test]
fn numeric_selection_scenarios() {
    let mut buffer = SharedBuffer::new();
    buffer.allocate(RoomObjectPacket::SIZE * 2).unwrap();
    let tags = TypeTagRegistry::with_standard_kinds();

    // hits=50/hitsMax=100, nothing else -> numerics (50, 100).
    // progress=10/progressTotal=20 only -> numerics (10, 20).
    let values = [
        LookValue::Object(
            Entity::new(EntityKind::Creep, WorldPosition::new(0, 0, "W1N1"))
                .with_id("withhits")
                .with_hits(50, 100),
        ),
        LookValue::Object(
            Entity::new(EntityKind::Wall, WorldPosition::new(0, 0, "W1N1"))
                .with_id("withprog")
                .with_progress(10, 20),
        ),
    ];

    let mut encoder = PacketEncoder::new(&mut buffer, &tags).unwrap();
    assert_eq!(encoder.encode_entities(&values).written, 2);

    let bytes = buffer.as_bytes();
    let rec0 = read_record(bytes, 0);
    let rec1 = read_record(bytes, 1);
    assert_eq!(i32::from_le_bytes(rec0[32..36].try_into().unwrap()), 50);
    assert_eq!(i32::from_le_bytes(rec0[36..40].try_into().unwrap()), 100);
    assert_eq!(i32::from_le_bytes(rec1[32..36].try_into().unwrap()), 10);
    assert_eq!(i32::from_le_bytes(rec1[36..40].try_into().unwrap()), 20);
}

#[test]
fn position_field_round_trips_through_the_record() {
    let mut buffer = SharedBuffer::new();
    buffer.allocate(RoomObjectPacket::SIZE).unwrap();
    let tags = TypeTagRegistry::with_standard_kinds();

    let values = [LookValue::Object(
        Entity::new(EntityKind::Controller, WorldPosition::new(25, 41, "E9S14"))
            .with_id("ctrl")
            .owned(),
    )];

    let mut encoder = PacketEncoder::new(&mut buffer, &tags).unwrap();
    assert_eq!(encoder.encode_entities(&values).written, 1);

    let bytes = buffer.as_bytes();
    let record: RoomObjectPacket = bytemuck::pod_read_unaligned(&bytes[..RoomObjectPacket::SIZE]);
    assert!(record.is_owned());
    let (x, y, region) = decode_position(&record.position);
    assert_eq!((x, y, region.as_str()), (25, 41, "E9S14"));
    assert_eq!(
        std::mem::size_of_val(&record.position),
        PositionRecord::SIZE
    );
}
